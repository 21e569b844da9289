//! Shared building blocks for the livescore workspace: configuration,
//! the error type, and the match/connection domain types.

pub mod config;
pub mod error;
pub mod types;
