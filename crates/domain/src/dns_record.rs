pub mod class;
pub mod record;
pub mod record_data;
pub mod record_type;

pub use class::DnsClass;
pub use record::{ResourceRecord, MAX_TTL};
pub use record_data::{RecordData, MAX_CHARACTER_STRING_LEN};
pub use record_type::RecordType;
