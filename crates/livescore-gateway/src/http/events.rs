//! Live score stream: GET /events
//!
//! Server-sent events. The first frame is the bare roster array; every later
//! frame is a `{"appState": ..., "matches": [...]}` update pushed by the
//! simulation clock. The stream stays open until the viewer disconnects.

use axum::{
    extract::State,
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use livescore_engine::ConnectionGuard;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::app::AppState;

pub async fn events_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // roster snapshot is queued before the sink can see any broadcast
    let conn = state.control.clock().attach(tx);
    let guard = ConnectionGuard::new(Arc::clone(&state.registry), conn);
    info!(conn_id = %guard.id(), "new event stream");

    // the guard lives inside the stream: when axum drops the body on
    // disconnect, the connection is unregistered
    let stream = async_stream::stream! {
        let _guard = guard;
        while let Some(frame) = rx.recv().await {
            yield Ok::<_, Infallible>(Event::default().data(frame));
        }
    };

    (
        [(header::CONNECTION, "keep-alive")],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
}
