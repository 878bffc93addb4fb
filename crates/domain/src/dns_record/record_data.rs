use super::RecordType;
use crate::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr};

pub const MAX_CHARACTER_STRING_LEN: usize = 255;

/// Type-specific RDATA of an ordinary resource record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// One or more `<character-string>`s, each at most 255 bytes.
    Txt(Vec<Vec<u8>>),
    /// RDLENGTH 0, as used by the RRset-delete operation.
    Empty,
    /// Raw RDATA of a type not modelled above. May be empty.
    Unknown(Vec<u8>),
}

impl RecordData {
    pub fn a_from_str(s: &str) -> Result<Self, DomainError> {
        s.trim()
            .parse::<Ipv4Addr>()
            .map(RecordData::A)
            .map_err(|_| DomainError::InvalidIpAddress(format!("'{}' is not an IPv4 address", s)))
    }

    pub fn aaaa_from_str(s: &str) -> Result<Self, DomainError> {
        s.trim()
            .parse::<Ipv6Addr>()
            .map(RecordData::Aaaa)
            .map_err(|_| DomainError::InvalidIpAddress(format!("'{}' is not an IPv6 address", s)))
    }

    /// Splits `tokens` on whitespace and encodes each token as its own character-string,
    /// so `"foo bar"` becomes two strings, not one seven-byte string.
    pub fn txt_from_tokens(tokens: &str) -> Result<Self, DomainError> {
        Self::txt(tokens.split_whitespace().map(|t| t.as_bytes().to_vec()).collect())
    }

    pub fn txt(strings: Vec<Vec<u8>>) -> Result<Self, DomainError> {
        if strings.is_empty() {
            return Err(DomainError::InvalidRecordData(
                "TXT record needs at least one character-string".to_string(),
            ));
        }
        if let Some(long) = strings.iter().find(|s| s.len() > MAX_CHARACTER_STRING_LEN) {
            return Err(DomainError::InvalidRecordData(format!(
                "TXT character-string of {} bytes exceeds {}",
                long.len(),
                MAX_CHARACTER_STRING_LEN
            )));
        }
        Ok(RecordData::Txt(strings))
    }

    /// The RR type this data naturally belongs to, if it has one.
    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            RecordData::A(_) => Some(RecordType::A),
            RecordData::Aaaa(_) => Some(RecordType::AAAA),
            RecordData::Txt(_) => Some(RecordType::TXT),
            RecordData::Empty | RecordData::Unknown(_) => None,
        }
    }
}
