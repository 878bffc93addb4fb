use crate::ports::DnsUpdateClient;
use ferrous_nsupdate_domain::config::DEFAULT_TTL;
use ferrous_nsupdate_domain::{
    DnsName, DomainError, RecordData, ResourceRecord, ServerAddr, TsigAlgorithm, TsigKey,
    UpdateOutcome, UpdateRequest, DEFAULT_TIMEOUT,
};
use ferrous_nsupdate_domain::wipe_string;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Raw inputs for replacing the address (and optionally TXT) records of one name.
#[derive(Debug, Clone, Default)]
pub struct ReplaceRecordsParams {
    pub key_name: String,
    /// Base64-encoded shared secret
    pub secret: String,
    pub algorithm: Option<String>,
    pub server: String,
    pub zone: String,
    /// Relative to `zone` unless it ends with a dot; `@` is the apex.
    pub domain: String,
    pub a_rdata: String,
    pub aaaa_rdata: Option<String>,
    /// Whitespace-separated tokens, one character-string each
    pub txt_rdata: Option<String>,
    pub ttl: Option<u64>,
    pub timeout: Option<Duration>,
}

pub struct ReplaceRecordsUseCase {
    client: Arc<dyn DnsUpdateClient>,
}

impl ReplaceRecordsUseCase {
    pub fn new(client: Arc<dyn DnsUpdateClient>) -> Self {
        Self { client }
    }

    /// Validates `params` into a request. Nothing is sent.
    pub fn build_request(params: &ReplaceRecordsParams) -> Result<UpdateRequest, DomainError> {
        let zone = DnsName::from_ascii(&params.zone)?;
        let name = DnsName::prepend_relative(&params.domain, &zone)?;

        let algorithm = match params.algorithm.as_deref() {
            Some(alg) => alg.parse::<TsigAlgorithm>()?,
            None => TsigAlgorithm::default(),
        };
        let key = TsigKey::from_base64(&params.key_name, algorithm, &params.secret)?;
        let server: ServerAddr = params.server.parse()?;
        let ttl = params.ttl.unwrap_or(u64::from(DEFAULT_TTL));

        let mut records = vec![ResourceRecord::new(
            name.clone(),
            ttl,
            RecordData::a_from_str(&params.a_rdata)?,
        )?];
        if let Some(aaaa) = &params.aaaa_rdata {
            records.push(ResourceRecord::new(
                name.clone(),
                ttl,
                RecordData::aaaa_from_str(aaaa)?,
            )?);
        }
        if let Some(txt) = &params.txt_rdata {
            records.push(ResourceRecord::new(
                name,
                ttl,
                RecordData::txt_from_tokens(txt)?,
            )?);
        }

        UpdateRequest::new(
            zone,
            records,
            key,
            server,
            params.timeout.unwrap_or(DEFAULT_TIMEOUT),
        )
    }

    /// Builds and sends the update. The base64 secret in `params` is wiped once
    /// the key has been decoded from it.
    pub async fn execute(&self, mut params: ReplaceRecordsParams) -> Result<UpdateOutcome, DomainError> {
        let request = Self::build_request(&params);
        wipe_string(&mut params.secret);
        let request = request?;

        let result = self.client.update(&request).await;
        let outcome = UpdateOutcome::from_result(
            &result,
            request.zone().to_string(),
            request.server().to_string(),
        );

        if result.is_success() {
            info!(
                zone = %request.zone(),
                server = %request.server(),
                records = request.records().len(),
                "Dynamic update applied"
            );
        } else {
            warn!(
                zone = %request.zone(),
                server = %request.server(),
                result = %result,
                fatal = outcome.fatal,
                retryable = result.is_retryable(),
                "Dynamic update failed"
            );
        }

        Ok(outcome)
    }
}
