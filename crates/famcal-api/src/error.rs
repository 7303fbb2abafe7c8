//! Error types for famcal-api

use thiserror::Error;

/// famcal-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Not authenticated; log in first")]
    AuthRequired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
