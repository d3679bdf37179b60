//! Color cycle inspection.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lightbot_app::ports::{LightingClient, Recognizer};
use lightbot_domain::cycle::CycleState;
use lightbot_domain::error::LightBotError;
use lightbot_domain::id::ConversationId;

use crate::error::ApiError;
use crate::state::AppState;

/// Cycle status of one conversation.
#[derive(Debug, Serialize)]
pub struct CycleResponse {
    pub conversation_id: ConversationId,
    pub state: CycleState,
    pub resume_pending: bool,
}

/// Possible responses from the status endpoint.
pub enum StatusResponse {
    Ok(Json<CycleResponse>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/conversations/{id}/cycle`
pub async fn status<R, L>(
    State(state): State<AppState<R, L>>,
    Path(id): Path<String>,
) -> Result<StatusResponse, ApiError>
where
    R: Recognizer + Send + Sync + 'static,
    L: LightingClient + Clone + Send + Sync + 'static,
{
    let conversation = ConversationId::new(id).map_err(LightBotError::from)?;
    let status = state.conversation_service.cycle_status(&conversation);
    Ok(StatusResponse::Ok(Json(CycleResponse {
        conversation_id: conversation,
        state: status.state,
        resume_pending: status.resume_pending,
    })))
}
