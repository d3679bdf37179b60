//! Conversation service — the entry point for inbound messages.

use lightbot_domain::conversation::Turn;
use lightbot_domain::error::LightBotError;
use lightbot_domain::id::ConversationId;

use crate::cycle_controller::CycleStatus;
use crate::intent_router::IntentRouter;
use crate::ports::{LightingClient, Recognizer};

/// Recognizes each message and routes it to its intent handler.
pub struct ConversationService<R, L> {
    recognizer: R,
    router: IntentRouter<L>,
}

impl<R, L> ConversationService<R, L>
where
    R: Recognizer + Send + Sync,
    L: LightingClient + Clone + Send + Sync + 'static,
{
    pub fn new(recognizer: R, router: IntentRouter<L>) -> Self {
        Self { recognizer, router }
    }

    /// Handle one user message.
    ///
    /// # Errors
    ///
    /// Returns [`LightBotError::Recognition`] when the NLU service cannot be
    /// reached. Lighting failures are reported to the user as replies.
    pub async fn handle_message(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<Turn, LightBotError> {
        let recognition = self.recognizer.recognize(text).await.inspect_err(|err| {
            tracing::error!(%conversation, error = %err, "failed to recognize message");
        })?;
        Ok(self.router.route(conversation, &recognition, text).await)
    }

    /// Cycle status for `conversation`.
    pub fn cycle_status(&self, conversation: &ConversationId) -> CycleStatus {
        self.router.lights().cycle_status(conversation)
    }

    /// Stop every running cycle and pending resume.
    pub fn shutdown(&self) {
        self.router.lights().shutdown();
    }
}
