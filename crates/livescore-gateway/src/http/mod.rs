pub mod events;
pub mod health;
pub mod matches;
pub mod status;
