use crate::{DnsName, DomainError, ResourceRecord, ServerAddr, TsigKey};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One RFC 2136 "replace these RRsets" request. Built fresh per call and not
/// modified afterwards; the key is owned for exactly this request.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    zone: DnsName,
    records: Vec<ResourceRecord>,
    key: TsigKey,
    server: ServerAddr,
    timeout: Duration,
}

impl UpdateRequest {
    pub fn new(
        zone: DnsName,
        records: Vec<ResourceRecord>,
        key: TsigKey,
        server: ServerAddr,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let first = records.first().ok_or(DomainError::EmptyUpdate)?;

        for record in &records {
            if !record.name.is_subdomain_of(&zone) {
                return Err(DomainError::NotInZone {
                    name: record.name.to_string(),
                    zone: zone.to_string(),
                });
            }
            if record.ttl != first.ttl {
                return Err(DomainError::InconsistentTtl {
                    first: first.ttl,
                    other: record.ttl,
                });
            }
        }

        Ok(Self {
            zone,
            records,
            key,
            server,
            timeout,
        })
    }

    pub fn zone(&self) -> &DnsName {
        &self.zone
    }

    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    pub fn key(&self) -> &TsigKey {
        &self.key
    }

    pub fn server(&self) -> &ServerAddr {
        &self.server
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
