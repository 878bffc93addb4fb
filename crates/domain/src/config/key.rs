use crate::TsigAlgorithm;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Base64-encoded shared secret
    #[serde(default)]
    pub secret: Option<String>,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            name: None,
            secret: None,
            algorithm: default_algorithm(),
        }
    }
}

fn default_algorithm() -> String {
    TsigAlgorithm::default().short_name().to_string()
}
