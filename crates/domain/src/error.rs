//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`LightBotError`] via `From` when crossing a port boundary.

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for lightbot use-cases.
#[derive(Debug, thiserror::Error)]
pub enum LightBotError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The NLU service could not recognize the message.
    #[error("recognition failed: {0}")]
    Recognition(#[source] BoxError),

    /// The lighting vendor rejected or failed a request.
    #[error("{0}")]
    Lighting(#[source] BoxError),
}

/// Invariant violations raised when building domain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A conversation id must not be empty.
    #[error("conversation id must not be empty")]
    EmptyConversationId,

    /// A device selector must not be empty.
    #[error("device selector must not be empty")]
    EmptySelector,

    /// Pulse period and cycle count must be strictly positive.
    #[error("effect {field} must be positive, got {value}")]
    NonPositiveEffectSetting { field: &'static str, value: f64 },
}
