//! # Client configuration — `modzart.toml`
//!
//! Connection settings for the backend API. The file is optional; a missing
//! or empty config is equivalent to the defaults.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//! timeout_secs = 10        # per-request deadline
//! ```

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `modzart.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address of the backend API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "modzart.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config =
            ClientConfig::from_toml("[api]\nbase_url = \"https://mods.example.com\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://mods.example.com");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = 30;
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
