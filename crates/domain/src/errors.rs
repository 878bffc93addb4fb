use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid TTL {0}: must be between 0 and 2147483647")]
    InvalidTtl(u64),

    #[error("Invalid record data: {0}")]
    InvalidRecordData(String),

    #[error("Invalid TSIG secret: {0}")]
    InvalidSecret(String),

    #[error("Unsupported TSIG algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid server address: {0}")]
    InvalidServerAddress(String),

    #[error("Record {name} is not inside zone {zone}")]
    NotInZone { name: String, zone: String },

    #[error("All records in one update must share a TTL (found {first} and {other})")]
    InconsistentTtl { first: u32, other: u32 },

    #[error("Update contains no records")]
    EmptyUpdate,

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport cancelled while talking to {server}")]
    TransportCancelled { server: String },
}

impl DomainError {
    /// True for the transport variants that mean the deadline (or cancellation) fired.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. } | DomainError::TransportCancelled { .. }
        )
    }
}
