pub mod replace_records;

pub use replace_records::{ReplaceRecordsParams, ReplaceRecordsUseCase};
