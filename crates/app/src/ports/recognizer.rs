//! Recognizer port — intent and entity extraction from free text.

use std::future::Future;

use lightbot_domain::error::LightBotError;
use lightbot_domain::intent::Recognition;

/// Classifies a message into an intent and extracts its entity slots.
pub trait Recognizer {
    /// Recognize the intent of `text`.
    fn recognize(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Recognition, LightBotError>> + Send;
}

impl<T: Recognizer + Send + Sync> Recognizer for std::sync::Arc<T> {
    fn recognize(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Recognition, LightBotError>> + Send {
        (**self).recognize(text)
    }
}
