//! Error types for famcal-core

use thiserror::Error;

/// Main error type for famcal-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session error: {0}")]
    Session(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for famcal-core
pub type Result<T> = std::result::Result<T, Error>;
