#![allow(unused_imports)]

pub mod builders;
pub mod dns_server_mock;

pub use builders::{KeyBuilder, RequestBuilder};
pub use dns_server_mock::{Behavior, MockUpdateServer, ReceivedRequest};
