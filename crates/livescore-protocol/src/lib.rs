//! Wire shapes shared by the event stream and the control endpoints.

pub mod frames;

pub use frames::{ControlReply, ScoreUpdate, StatusReply};
