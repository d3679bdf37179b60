//! Intent router — one handler per recognized intent.

use lightbot_domain::conversation::Turn;
use lightbot_domain::id::ConversationId;
use lightbot_domain::intent::{Intent, Recognition};
use lightbot_domain::messages;

use crate::ports::LightingClient;
use crate::services::light_service::LightService;

/// Default minimum score for an intent to be acted upon.
pub const DEFAULT_INTENT_THRESHOLD: f64 = 0.1;

/// Dispatches a recognition result to exactly one handler.
pub struct IntentRouter<L> {
    lights: LightService<L>,
    threshold: f64,
}

impl<L> IntentRouter<L>
where
    L: LightingClient + Clone + Send + Sync + 'static,
{
    pub fn new(lights: LightService<L>, threshold: f64) -> Self {
        Self { lights, threshold }
    }

    /// The light service behind the `Lights` intent.
    pub fn lights(&self) -> &LightService<L> {
        &self.lights
    }

    /// Route `recognition` for the message `text` and collect the replies.
    pub async fn route(
        &self,
        conversation: &ConversationId,
        recognition: &Recognition,
        text: &str,
    ) -> Turn {
        let intent = recognition.routed_intent(self.threshold);
        tracing::debug!(
            %conversation,
            recognized = %recognition.intent,
            score = recognition.score,
            routed = %intent,
            "routing message"
        );

        let mut turn = Turn::new();
        match intent {
            Intent::Greeting => turn.send(messages::GREETING),
            Intent::Help => turn.send(messages::HELP),
            Intent::Cancel => turn.send_and_end(messages::CANCEL),
            Intent::Lights => {
                self.lights
                    .handle(conversation, &recognition.slots, &mut turn)
                    .await;
            }
            Intent::None => turn.send_and_end(messages::not_understood(text)),
        }
        turn
    }
}
