//! LUIS recognizer configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the LUIS endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LuisConfig {
    /// Endpoint host, e.g. `westus.api.cognitive.microsoft.com`. A value with
    /// an explicit scheme (`http://localhost:5000`) is used as is.
    pub host: String,
    /// LUIS application id.
    pub app_id: String,
    /// Subscription key sent as the `subscription-key` query parameter.
    pub api_key: String,
    /// Endpoint API version path segment.
    pub api_version: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl LuisConfig {
    /// Per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for LuisConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            app_id: String::new(),
            api_key: String::new(),
            api_version: "v2.0".to_string(),
            request_timeout_secs: 10,
        }
    }
}
