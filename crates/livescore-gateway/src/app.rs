use axum::{
    routing::{get, post},
    Router,
};
use livescore_core::config::LivescoreConfig;
use livescore_engine::{ConnectionRegistry, ControlSurface, SimulationClock};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Central shared state, passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: LivescoreConfig,
    /// Open viewer streams. Shared with the simulation clock, which
    /// broadcasts through it.
    pub registry: Arc<ConnectionRegistry>,
    pub control: ControlSurface,
}

impl AppState {
    pub fn new(config: LivescoreConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let clock = SimulationClock::from_config(Arc::clone(&registry), &config.simulation);
        Self::with_clock(config, clock)
    }

    /// Wire the state around an already-built clock (custom goal draw, timings).
    pub fn with_clock(config: LivescoreConfig, clock: SimulationClock) -> Self {
        Self {
            config,
            registry: Arc::clone(clock.registry()),
            control: ControlSurface::new(clock),
        }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = state.config.gateway.cors;

    let router = Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/events", get(crate::http::events::events_handler))
        .route("/status", get(crate::http::status::status_handler))
        .route("/matches/start", post(crate::http::matches::start_handler))
        .route("/matches/restart", post(crate::http::matches::restart_handler))
        .route("/matches/stop", post(crate::http::matches::stop_handler))
        .with_state(state);

    let router = if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };
    router.layer(tower_http::trace::TraceLayer::new_for_http())
}
