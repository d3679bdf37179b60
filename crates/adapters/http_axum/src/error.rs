//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lightbot_domain::error::LightBotError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors returned by handlers, mapped to an HTTP status code.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or wrong bearer credentials.
    Unauthorized,
    /// A use-case failed.
    Domain(LightBotError),
}

impl From<LightBotError> for ApiError {
    fn from(err: LightBotError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            Self::Domain(LightBotError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(err @ (LightBotError::Recognition(_) | LightBotError::Lighting(_))) => {
                tracing::error!(error = %err, "upstream service error");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
