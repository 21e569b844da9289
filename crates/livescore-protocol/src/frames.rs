use livescore_core::types::{Match, SimulationState};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Server → viewer push, sent on every tick and when a run ends.
/// Wire: `{ "appState": "IN_PROGRESS", "matches": [{ "home": {...}, "away": {...} }] }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate<'a> {
    #[serde(rename = "appState")]
    pub app_state: SimulationState,
    pub matches: Cow<'a, [Match]>,
}

impl<'a> ScoreUpdate<'a> {
    /// Borrow the live roster; nothing is cloned before serialization.
    pub fn new(app_state: SimulationState, matches: &'a [Match]) -> Self {
        Self {
            app_state,
            matches: Cow::Borrowed(matches),
        }
    }

    /// Final frame of a run. Always tagged `FINISHED`.
    pub fn finished(matches: &'a [Match]) -> Self {
        Self::new(SimulationState::Finished, matches)
    }
}

/// GET /status response.
/// Wire: `{ "clients": 2 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    pub clients: usize,
}

/// POST /matches/{start,restart,stop} response.
/// Wire: `{ "status": "IN_PROGRESS" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlReply {
    pub status: SimulationState,
}
