use axum::{extract::State, Json};
use livescore_protocol::StatusReply;
use std::sync::Arc;

use crate::app::AppState;

/// GET /status: number of open event streams. No side effects.
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusReply> {
    Json(StatusReply {
        clients: state.control.status(),
    })
}
