//! Error types for famcal-geo

use thiserror::Error;

/// famcal-geo error type
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Geocoding error: {0}")]
    ApiError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GeoError>;
