#![allow(unused_imports)]

pub mod mock_update_client;

pub use mock_update_client::MockUpdateClient;
