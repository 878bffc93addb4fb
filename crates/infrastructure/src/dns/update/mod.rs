pub mod message_builder;
pub mod response_parser;

pub use message_builder::UpdateBuilder;
pub use response_parser::ResponseParser;
