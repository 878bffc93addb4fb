use super::{DnsClass, RecordData, RecordType};
use crate::{DnsName, DomainError};

/// Largest TTL a record may carry (RFC 2181 §8).
pub const MAX_TTL: u32 = 2_147_483_647;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DnsName,
    pub rtype: RecordType,
    pub class: DnsClass,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    /// An `IN`-class record whose type follows from its data.
    pub fn new(name: DnsName, ttl: u64, data: RecordData) -> Result<Self, DomainError> {
        let rtype = data.record_type().ok_or_else(|| {
            DomainError::InvalidRecordData("record data has no implied type".to_string())
        })?;

        Ok(Self {
            name,
            rtype,
            class: DnsClass::IN,
            ttl: validate_ttl(ttl)?,
            data,
        })
    }

    /// The RRset-delete form for `name`/`rtype`: CLASS ANY, TTL 0, no RDATA.
    pub fn delete_rrset(name: DnsName, rtype: RecordType) -> Self {
        Self {
            name,
            rtype,
            class: DnsClass::ANY,
            ttl: 0,
            data: RecordData::Empty,
        }
    }
}

pub fn validate_ttl(ttl: u64) -> Result<u32, DomainError> {
    if ttl > MAX_TTL as u64 {
        return Err(DomainError::InvalidTtl(ttl));
    }
    Ok(ttl as u32)
}
