//! LUIS adapter error types.

use lightbot_domain::error::LightBotError;

/// Errors specific to the LUIS adapter.
#[derive(Debug, thiserror::Error)]
pub enum LuisError {
    /// Host, app id and version do not form a valid endpoint URL.
    #[error("invalid LUIS endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The HTTP client could not be built or the request could not be sent.
    #[error("LUIS request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{status} {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to parse LUIS response")]
    Decode(#[source] serde_json::Error),
}

impl LuisError {
    /// Convert into a [`LightBotError::Recognition`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> LightBotError {
        LightBotError::Recognition(Box::new(self))
    }
}

impl From<LuisError> for LightBotError {
    fn from(err: LuisError) -> Self {
        err.into_domain()
    }
}

impl From<reqwest::Error> for LuisError {
    /// The request URL carries the subscription key and is dropped.
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_to_recognition_error() {
        let err: LightBotError = LuisError::Status {
            status: reqwest::StatusCode::UNAUTHORIZED,
            message: "Access denied due to invalid subscription key.".to_string(),
        }
        .into();
        assert!(matches!(err, LightBotError::Recognition(_)));
    }

    #[test]
    fn should_display_invalid_endpoint() {
        let err = LuisError::InvalidEndpoint {
            url: "https:///luis".to_string(),
            reason: "empty host".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid LUIS endpoint \"https:///luis\": empty host"
        );
    }
}
