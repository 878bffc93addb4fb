pub mod transport;
pub mod tsig;
pub mod update;
pub mod updater;
pub mod wire;

pub use transport::UpdateClient;
pub use update::{ResponseParser, UpdateBuilder};
pub use updater::DnsUpdater;
