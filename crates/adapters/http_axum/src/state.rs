//! Shared application state for axum handlers.

use std::sync::Arc;

use lightbot_app::ports::{LightingClient, Recognizer};
use lightbot_app::services::conversation_service::ConversationService;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the recognizer and lighting client
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R, L> {
    /// Conversation use-case.
    pub conversation_service: Arc<ConversationService<R, L>>,
    /// Bearer token required on `/api/messages`, when set.
    pub app_password: Option<Arc<str>>,
}

impl<R, L> Clone for AppState<R, L> {
    fn clone(&self) -> Self {
        Self {
            conversation_service: Arc::clone(&self.conversation_service),
            app_password: self.app_password.clone(),
        }
    }
}

impl<R, L> AppState<R, L>
where
    R: Recognizer + Send + Sync + 'static,
    L: LightingClient + Clone + Send + Sync + 'static,
{
    /// Create a new application state; an empty password disables auth.
    pub fn new(service: Arc<ConversationService<R, L>>, app_password: Option<String>) -> Self {
        Self {
            conversation_service: service,
            app_password: app_password
                .filter(|password| !password.is_empty())
                .map(Arc::from),
        }
    }
}
