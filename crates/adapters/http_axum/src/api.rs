//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod cycle;
#[allow(clippy::missing_errors_doc)]
pub mod messages;

use axum::Router;
use axum::routing::{get, post};

use lightbot_app::ports::{LightingClient, Recognizer};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, L>() -> Router<AppState<R, L>>
where
    R: Recognizer + Send + Sync + 'static,
    L: LightingClient + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/messages", post(messages::receive::<R, L>))
        .route("/conversations/{id}/cycle", get(cycle::status::<R, L>))
}
