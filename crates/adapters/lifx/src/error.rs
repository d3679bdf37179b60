//! LIFX adapter error types.

use lightbot_domain::error::LightBotError;

/// Errors specific to the LIFX adapter.
#[derive(Debug, thiserror::Error)]
pub enum LifxError {
    /// The configured base URL cannot be used to build request URLs.
    #[error("invalid LIFX base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The HTTP client could not be built or the request could not be sent.
    #[error("LIFX request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{status} {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to parse LIFX response")]
    Decode(#[source] serde_json::Error),
}

impl LifxError {
    /// Convert into a [`LightBotError::Lighting`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> LightBotError {
        LightBotError::Lighting(Box::new(self))
    }
}

impl From<LifxError> for LightBotError {
    fn from(err: LifxError) -> Self {
        err.into_domain()
    }
}

impl From<reqwest::Error> for LifxError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
