//! LIFX client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Public LIFX HTTP API root.
pub const DEFAULT_BASE_URL: &str = "https://api.lifx.com/v1";

/// Configuration for the LIFX HTTP client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifxConfig {
    /// Personal access token sent as a bearer token.
    pub api_key: String,
    /// API root; `lights/{selector}/...` is appended to it.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl LifxConfig {
    /// Per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for LifxConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_target_public_api_by_default() {
        let config = LifxConfig::default();
        assert_eq!(config.base_url, "https://api.lifx.com/v1");
        assert!(config.api_key.is_empty());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            api_key = "c0ffee"
            base_url = "http://localhost:8080/v1"
            request_timeout_secs = 3
        "#;
        let config: LifxConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.api_key, "c0ffee");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: LifxConfig = toml::from_str(r#"api_key = "c0ffee""#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 10);
    }
}
