#![allow(dead_code)]
use ferrous_nsupdate_domain::{
    DnsName, RecordData, ResourceRecord, ServerAddr, TsigAlgorithm, TsigKey, UpdateRequest,
};
use ferrous_nsupdate_infrastructure::dns::wire::Message;
use ferrous_nsupdate_infrastructure::dns::UpdateBuilder;
use std::net::SocketAddr;
use std::time::Duration;

pub const KEY_NAME: &str = "ddns-key.example.org";
pub const SECRET_B64: &str = "c2VjcmV0LWtleS1mb3ItdGVzdHM=";

pub struct KeyBuilder;

impl KeyBuilder {
    pub fn default_key() -> TsigKey {
        Self::with_algorithm(TsigAlgorithm::HmacMd5)
    }

    pub fn with_algorithm(algorithm: TsigAlgorithm) -> TsigKey {
        TsigKey::from_base64(KEY_NAME, algorithm, SECRET_B64).unwrap()
    }

    /// Same name and algorithm, different secret.
    pub fn wrong_secret() -> TsigKey {
        TsigKey::from_base64(KEY_NAME, TsigAlgorithm::HmacMd5, "b3RoZXItc2VjcmV0").unwrap()
    }

    pub fn other_name() -> TsigKey {
        TsigKey::from_base64("other-key", TsigAlgorithm::HmacMd5, SECRET_B64).unwrap()
    }
}

pub struct RequestBuilder {
    zone: String,
    records: Vec<(String, RecordData)>,
    ttl: u64,
    key: TsigKey,
    server: ServerAddr,
    timeout: Duration,
}

impl RequestBuilder {
    pub fn new(server: SocketAddr) -> Self {
        Self {
            zone: "example.org".to_string(),
            records: Vec::new(),
            ttl: 3600,
            key: KeyBuilder::default_key(),
            server: ServerAddr::Resolved(server),
            timeout: Duration::from_secs(2),
        }
    }

    pub fn a(mut self, name: &str, ip: &str) -> Self {
        self.records
            .push((name.to_string(), RecordData::a_from_str(ip).unwrap()));
        self
    }

    pub fn txt(mut self, name: &str, tokens: &str) -> Self {
        self.records
            .push((name.to_string(), RecordData::txt_from_tokens(tokens).unwrap()));
        self
    }

    pub fn key(mut self, key: TsigKey) -> Self {
        self.key = key;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn records(&self) -> Vec<ResourceRecord> {
        let zone = DnsName::from_ascii(&self.zone).unwrap();
        self.records
            .iter()
            .map(|(name, data)| {
                let name = DnsName::prepend_relative(name, &zone).unwrap();
                ResourceRecord::new(name, self.ttl, data.clone()).unwrap()
            })
            .collect()
    }

    pub fn message(&self, id: u16) -> Message {
        let zone = DnsName::from_ascii(&self.zone).unwrap();
        UpdateBuilder::build_with_id(id, &zone, &self.records())
    }

    pub fn build(self) -> UpdateRequest {
        let records = self.records();
        UpdateRequest::new(
            DnsName::from_ascii(&self.zone).unwrap(),
            records,
            self.key,
            self.server,
            self.timeout,
        )
        .unwrap()
    }
}
