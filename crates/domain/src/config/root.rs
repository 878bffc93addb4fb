use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::key::KeyConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::update::UpdateConfig;
use crate::dns_record::MAX_TTL;
use crate::tsig::wipe_string;

const LOCAL_CONFIG_PATH: &str = "ferrous-nsupdate.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-nsupdate/config.toml";

/// Main configuration structure for ferrous-nsupdate
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Primary master and exchange deadline
    #[serde(default)]
    pub server: ServerConfig,

    /// TSIG key used to sign updates
    #[serde(default)]
    pub key: KeyConfig,

    /// Defaults applied to each update
    #[serde(default)]
    pub update: UpdateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-nsupdate.toml in current directory
    /// 3. /etc/ferrous-nsupdate/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let mut contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        let config = Self::from_toml(&contents);
        // The file may carry the key secret.
        wipe_string(&mut contents);
        config
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.server.address = Some(server);
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.server.timeout_secs = timeout;
        }
        if let Some(name) = overrides.key_name {
            self.key.name = Some(name);
        }
        if let Some(secret) = overrides.key_secret {
            self.key.secret = Some(secret);
        }
        if let Some(algorithm) = overrides.key_algorithm {
            self.key.algorithm = algorithm;
        }
        if let Some(ttl) = overrides.default_ttl {
            self.update.default_ttl = ttl;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "server.timeout_secs cannot be 0".to_string(),
            ));
        }

        if self.update.default_ttl > MAX_TTL {
            return Err(ConfigError::Validation(format!(
                "update.default_ttl {} exceeds {}",
                self.update.default_ttl, MAX_TTL
            )));
        }

        if let Some(address) = &self.server.address {
            if address.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "server.address is empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub timeout_secs: Option<u64>,
    pub key_name: Option<String>,
    pub key_secret: Option<String>,
    pub key_algorithm: Option<String>,
    pub default_ttl: Option<u32>,
    pub log_level: Option<String>,
}
