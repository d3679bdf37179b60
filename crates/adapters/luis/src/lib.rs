//! # lightbot-adapter-luis
//!
//! Recognizer adapter for the LUIS v2 prediction endpoint.
//!
//! `GET https://{host}/luis/{api_version}/apps/{app_id}?subscription-key={key}&q={text}`
//!
//! The top-scoring intent becomes the [`Recognition`] intent, and every
//! entity becomes a slot named after its entity type.

pub mod config;
pub mod error;
mod response;

pub use config::LuisConfig;
pub use error::LuisError;

use lightbot_app::ports::Recognizer;
use lightbot_domain::error::LightBotError;
use lightbot_domain::intent::Recognition;
use reqwest::Url;

use crate::response::{LuisResponse, error_message};

/// LUIS prediction client.
#[derive(Debug, Clone)]
pub struct LuisRecognizer {
    http: reqwest::Client,
    endpoint: Url,
    key: String,
}

impl LuisRecognizer {
    /// Build a recognizer from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LuisError::InvalidEndpoint`] if host, app id and version do
    /// not form a valid URL, or [`LuisError::Http`] if the HTTP client cannot
    /// be built.
    pub fn new(config: &LuisConfig) -> Result<Self, LuisError> {
        let endpoint = endpoint_url(config)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            endpoint,
            key: config.api_key.clone(),
        })
    }

    fn query_url(&self, text: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("subscription-key", &self.key)
            .append_pair("q", text);
        url
    }

    async fn predict(&self, text: &str) -> Result<Recognition, LuisError> {
        let response = self.http.get(self.query_url(text)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LuisError::Status {
                status,
                message: error_message(&body),
            });
        }
        let prediction: LuisResponse = serde_json::from_str(&body).map_err(LuisError::Decode)?;
        Ok(prediction.into_recognition())
    }
}

impl Recognizer for LuisRecognizer {
    async fn recognize(&self, text: &str) -> Result<Recognition, LightBotError> {
        let recognition = self.predict(text).await?;
        tracing::debug!(
            intent = %recognition.intent,
            score = recognition.score,
            entities = recognition.slots.len(),
            "message recognized"
        );
        Ok(recognition)
    }
}

fn endpoint_url(config: &LuisConfig) -> Result<Url, LuisError> {
    let host = config.host.trim().trim_end_matches('/');
    let base = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    let invalid = |reason: String| LuisError::InvalidEndpoint {
        url: base.clone(),
        reason,
    };

    let mut url = Url::parse(&base).map_err(|err| invalid(err.to_string()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    url.path_segments_mut()
        .map_err(|()| invalid("host cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend(["luis", config.api_version.as_str(), "apps", config.app_id.as_str()]);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> LuisConfig {
        LuisConfig {
            host: host.to_string(),
            app_id: "2f6b1c3e".to_string(),
            api_key: "secret".to_string(),
            ..LuisConfig::default()
        }
    }

    #[test]
    fn should_build_v2_endpoint_from_bare_host() {
        let url = endpoint_url(&config("westus.api.cognitive.microsoft.com")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://westus.api.cognitive.microsoft.com/luis/v2.0/apps/2f6b1c3e"
        );
    }

    #[test]
    fn should_keep_explicit_scheme() {
        let url = endpoint_url(&config("http://localhost:5000/")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/luis/v2.0/apps/2f6b1c3e");
    }

    #[test]
    fn should_reject_empty_host() {
        let err = endpoint_url(&config("")).unwrap_err();
        assert!(matches!(err, LuisError::InvalidEndpoint { .. }));
    }

    #[test]
    fn should_encode_query_text_and_key() {
        let recognizer = LuisRecognizer::new(&config("westus.api.cognitive.microsoft.com")).unwrap();
        let url = recognizer.query_url("turn the kitchen lights #ff0000 & on");
        assert_eq!(
            url.query(),
            Some("subscription-key=secret&q=turn+the+kitchen+lights+%23ff0000+%26+on")
        );
    }

    #[tokio::test]
    async fn should_not_reveal_subscription_key_when_request_fails() {
        let recognizer = LuisRecognizer::new(&LuisConfig {
            api_key: "SUPERSECRETKEY".to_string(),
            ..config("http://127.0.0.1:1")
        })
        .unwrap();

        let err = recognizer.recognize("turn on").await.unwrap_err();

        assert!(matches!(err, LightBotError::Recognition(_)));
        let mut source: Option<&dyn std::error::Error> = Some(&err);
        while let Some(current) = source {
            assert!(!current.to_string().contains("SUPERSECRETKEY"));
            assert!(!format!("{current:?}").contains("SUPERSECRETKEY"));
            source = current.source();
        }
    }
}
