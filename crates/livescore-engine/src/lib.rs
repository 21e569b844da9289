//! `livescore-engine`: match simulation and live fan-out to viewers.
//!
//! # Overview
//!
//! A fixed roster of matches lives in the [`store::MatchStore`]. The
//! [`clock::SimulationClock`] drives a single Tokio tick loop that scores
//! random goals into the store and pushes every resulting snapshot through
//! the [`registry::ConnectionRegistry`] to all open viewer streams. The
//! [`control::ControlSurface`] is the only way to start, restart, or stop a
//! run.
//!
//! # Run lifecycle
//!
//! | State         | Entered by                                            |
//! |---------------|-------------------------------------------------------|
//! | `PRISTINE`    | process start, before any control command             |
//! | `IN_PROGRESS` | `start` / `restart` (counter and goals zeroed)        |
//! | `FINISHED`    | `stop`, or the first tick after the tick bound is hit |

pub mod clock;
pub mod control;
pub mod draw;
pub mod registry;
pub mod store;

pub use clock::{ClockSettings, SimulationClock};
pub use control::ControlSurface;
pub use draw::{Goal, GoalDraw, RandomGoals};
pub use registry::{Connection, ConnectionGuard, ConnectionRegistry};
pub use store::MatchStore;
