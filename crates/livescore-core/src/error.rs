use thiserror::Error;

#[derive(Debug, Error)]
pub enum LivescoreError {
    /// Config sources could not be read or merged.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting {
        key: &'static str,
        reason: &'static str,
    },
}

impl LivescoreError {
    /// Short error code string, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            LivescoreError::Config(_) => "CONFIG_ERROR",
            LivescoreError::InvalidSetting { .. } => "INVALID_SETTING",
        }
    }
}

pub type Result<T> = std::result::Result<T, LivescoreError>;
