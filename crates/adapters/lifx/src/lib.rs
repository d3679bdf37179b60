//! # lightbot-adapter-lifx
//!
//! Lighting adapter for the LIFX cloud HTTP API.
//!
//! ## Responsibilities
//! - Implement the `LightingClient` port from `lightbot-app`
//! - Translate domain light states, pulses and deltas into LIFX request bodies
//! - Turn non-success responses into typed [`LifxError`]s
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | set state | `PUT {base}/lights/{selector}/state` |
//! | pulse | `POST {base}/lights/{selector}/effects/pulse` |
//! | set delta | `POST {base}/lights/{selector}/state/delta` |
//!
//! Every request is a single attempt authenticated with a bearer token.

pub mod config;
pub mod error;
mod wire;

pub use config::LifxConfig;
pub use error::LifxError;

use lightbot_app::ports::LightingClient;
use lightbot_domain::effect::PulseEffect;
use lightbot_domain::error::LightBotError;
use lightbot_domain::light::{LightResult, LightState, Selector, StateDelta};
use reqwest::{Method, Url};
use serde::Serialize;

use crate::wire::{DeltaBody, ErrorBody, PulseBody, ResultsBody, SetStateBody};

/// LIFX HTTP client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct LifxClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl LifxClient {
    /// Build a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LifxError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL, or [`LifxError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &LifxConfig) -> Result<Self, LifxError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url,
            token: config.api_key.clone(),
        })
    }

    /// URL of `lights/{selector}/{path..}`; the selector is one encoded segment.
    fn lights_url(&self, selector: &Selector, path: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("lights")
                .push(selector.as_str())
                .extend(path);
        }
        url
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<Vec<LightResult>, LifxError> {
        tracing::debug!(%method, %url, "sending LIFX request");
        let response = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(LifxError::Status {
                status,
                message: error_message(&text),
            });
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let body: ResultsBody = serde_json::from_str(&text).map_err(LifxError::Decode)?;
        Ok(body.into_results())
    }
}

impl LightingClient for LifxClient {
    async fn set_state(
        &self,
        selector: &Selector,
        state: &LightState,
    ) -> Result<Vec<LightResult>, LightBotError> {
        let url = self.lights_url(selector, &["state"]);
        let results = self
            .send(Method::PUT, url, &SetStateBody::from(state))
            .await?;
        Ok(results)
    }

    async fn pulse(
        &self,
        selector: &Selector,
        effect: &PulseEffect,
    ) -> Result<Vec<LightResult>, LightBotError> {
        let url = self.lights_url(selector, &["effects", "pulse"]);
        let results = self
            .send(Method::POST, url, &PulseBody::from(effect))
            .await?;
        Ok(results)
    }

    async fn set_delta(
        &self,
        selector: &Selector,
        delta: &StateDelta,
    ) -> Result<Vec<LightResult>, LightBotError> {
        let url = self.lights_url(selector, &["state", "delta"]);
        let results = self
            .send(Method::POST, url, &DeltaBody::from(delta))
            .await?;
        Ok(results)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, LifxError> {
    let invalid = |reason: &str| LifxError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an absolute http(s) url"));
    }
    Ok(url)
}

/// Vendor message from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|body| body.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> LifxClient {
        LifxClient::new(&LifxConfig {
            api_key: "c0ffee".to_string(),
            base_url: base_url.to_string(),
            request_timeout_secs: 1,
        })
        .unwrap()
    }

    fn selector(value: &str) -> Selector {
        Selector::new(value).unwrap()
    }

    #[test]
    fn should_encode_selector_as_single_segment() {
        let url = client("https://api.lifx.com/v1").lights_url(&selector("label:Bottom Bulb"), &["state"]);
        assert_eq!(
            url.as_str(),
            "https://api.lifx.com/v1/lights/label:Bottom%20Bulb/state"
        );
    }

    #[test]
    fn should_escape_slashes_in_selector() {
        let url = client("https://api.lifx.com/v1").lights_url(&selector("label:a/b"), &["state"]);
        assert_eq!(url.as_str(), "https://api.lifx.com/v1/lights/label:a%2Fb/state");
    }

    #[test]
    fn should_tolerate_trailing_slash_in_base_url() {
        let url = client("http://localhost:8080/v1/").lights_url(&selector("all"), &["effects", "pulse"]);
        assert_eq!(url.as_str(), "http://localhost:8080/v1/lights/all/effects/pulse");
    }

    #[test]
    fn should_build_delta_url() {
        let url = client("https://api.lifx.com/v1").lights_url(&selector("all"), &["state", "delta"]);
        assert_eq!(url.as_str(), "https://api.lifx.com/v1/lights/all/state/delta");
    }

    #[test]
    fn should_reject_relative_base_url() {
        let err = LifxClient::new(&LifxConfig {
            base_url: "api.lifx.com".to_string(),
            ..LifxConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, LifxError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn should_reject_non_http_base_url() {
        let err = LifxClient::new(&LifxConfig {
            base_url: "mailto:lights@example.com".to_string(),
            ..LifxConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, LifxError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn should_extract_vendor_error_message() {
        assert_eq!(error_message(r#"{"error":"Invalid token"}"#), "Invalid token");
    }

    #[test]
    fn should_fall_back_to_raw_error_text() {
        assert_eq!(error_message(" Bad Gateway \n"), "Bad Gateway");
    }
}
