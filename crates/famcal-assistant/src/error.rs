//! Error types for famcal-assistant

use thiserror::Error;

/// famcal-assistant error type
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Assistant error: {0}")]
    ApiError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AssistantError>;
