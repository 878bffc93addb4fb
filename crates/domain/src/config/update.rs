use serde::{Deserialize, Serialize};

pub const DEFAULT_TTL: u32 = 3600;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateConfig {
    #[serde(default = "default_ttl")]
    pub default_ttl: u32,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
        }
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}
