pub mod errors;
pub mod key;
pub mod logging;
pub mod root;
pub mod server;
pub mod update;

pub use errors::ConfigError;
pub use key::KeyConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use update::{UpdateConfig, DEFAULT_TTL};
