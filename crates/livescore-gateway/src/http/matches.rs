//! Run control: POST /matches/{start,restart,stop}
//!
//! No request body. Every route answers with the state the simulation is in
//! once the command has been applied:
//!
//! Response: `{"status": "IN_PROGRESS"}` or `{"status": "FINISHED"}`

use axum::{extract::State, Json};
use livescore_protocol::ControlReply;
use std::sync::Arc;

use crate::app::AppState;

pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ControlReply> {
    Json(ControlReply {
        status: state.control.start(),
    })
}

pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Json<ControlReply> {
    Json(ControlReply {
        status: state.control.restart(),
    })
}

pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ControlReply> {
    Json(ControlReply {
        status: state.control.stop(),
    })
}
