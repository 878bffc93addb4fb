//! Ferrous nsupdate domain layer
pub mod config;
pub mod dns_name;
pub mod dns_protocol;
pub mod dns_record;
pub mod dns_request;
pub mod errors;
pub mod rcode;
pub mod tsig;
pub mod update_result;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_name::DnsName;
pub use dns_protocol::{ServerAddr, DEFAULT_DNS_PORT};
pub use dns_record::{
    DnsClass, RecordData, RecordType, ResourceRecord, MAX_CHARACTER_STRING_LEN, MAX_TTL,
};
pub use dns_request::{UpdateRequest, DEFAULT_TIMEOUT};
pub use errors::DomainError;
pub use rcode::Rcode;
pub use tsig::{wipe_string, AuthFailure, TsigAlgorithm, TsigKey, DEFAULT_FUDGE};
pub use update_result::{UpdateOutcome, UpdateResult};
