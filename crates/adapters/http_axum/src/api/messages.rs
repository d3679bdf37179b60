//! Bot webhook: one inbound activity in, the turn's replies out.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use lightbot_app::ports::{LightingClient, Recognizer};
use lightbot_domain::conversation::{Reply, Turn};
use lightbot_domain::error::LightBotError;
use lightbot_domain::id::{ActivityId, ConversationId};

use crate::error::ApiError;
use crate::state::AppState;

/// Activity type carrying user text; every other type is acknowledged only.
pub const MESSAGE_ACTIVITY: &str = "message";

/// Inbound activity.
#[derive(Debug, Deserialize)]
pub struct Activity {
    #[serde(rename = "type", default = "message_activity")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    pub conversation: ConversationAccount,
}

/// Conversation an activity belongs to.
#[derive(Debug, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
}

fn message_activity() -> String {
    MESSAGE_ACTIVITY.to_string()
}

/// Body returned for a handled activity.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub activity_id: ActivityId,
    pub replies: Vec<Reply>,
    pub end_dialog: bool,
}

/// Possible responses from the messages endpoint.
pub enum ReceiveResponse {
    Ok(Json<MessageResponse>),
}

impl IntoResponse for ReceiveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/messages`
pub async fn receive<R, L>(
    State(state): State<AppState<R, L>>,
    headers: HeaderMap,
    Json(activity): Json<Activity>,
) -> Result<ReceiveResponse, ApiError>
where
    R: Recognizer + Send + Sync + 'static,
    L: LightingClient + Clone + Send + Sync + 'static,
{
    authorize(&headers, state.app_password.as_deref())?;
    let conversation =
        ConversationId::new(activity.conversation.id).map_err(LightBotError::from)?;
    let activity_id = ActivityId::new();

    let turn = if activity.kind == MESSAGE_ACTIVITY {
        tracing::info!(%conversation, %activity_id, "message received");
        state
            .conversation_service
            .handle_message(&conversation, &activity.text)
            .await?
    } else {
        tracing::debug!(%conversation, kind = %activity.kind, "activity acknowledged");
        Turn::new()
    };

    Ok(ReceiveResponse::Ok(Json(MessageResponse {
        activity_id,
        replies: turn.replies,
        end_dialog: turn.end_dialog,
    })))
}

/// Check the `Authorization: Bearer <password>` header when a password is set.
fn authorize(headers: &HeaderMap, password: Option<&str>) -> Result<(), ApiError> {
    let Some(password) = password else {
        return Ok(());
    };
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if token == Some(password) {
        Ok(())
    } else {
        tracing::warn!("rejected activity with missing or invalid credentials");
        Err(ApiError::Unauthorized)
    }
}
