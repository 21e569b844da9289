use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one open viewer stream (UUIDv7, timestamp-derived,
/// so ids sort by connect time in logs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnId(pub String);

impl ConnId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for ConnId {
    fn default() -> Self {
        Self::new()
    }
}

/// One competitor in a match.
/// Wire: `{ "teamName": "Germany", "goals": 0 }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    #[serde(rename = "teamName")]
    pub name: String,
    pub goals: u32,
}

impl Side {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            goals: 0,
        }
    }
}

/// Which of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideKind {
    Home,
    Away,
}

impl SideKind {
    /// Selector as drawn by the simulation: 0 = home, anything else = away.
    pub fn from_index(index: u32) -> Self {
        if index == 0 {
            SideKind::Home
        } else {
            SideKind::Away
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub home: Side,
    pub away: Side,
}

impl Match {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: Side::new(home),
            away: Side::new(away),
        }
    }

    pub fn side_mut(&mut self, kind: SideKind) -> &mut Side {
        match kind {
            SideKind::Home => &mut self.home,
            SideKind::Away => &mut self.away,
        }
    }
}

/// Process-wide simulation lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationState {
    /// No control command has run yet.
    #[default]
    Pristine,
    InProgress,
    Finished,
}

impl SimulationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationState::Pristine => "PRISTINE",
            SimulationState::InProgress => "IN_PROGRESS",
            SimulationState::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
