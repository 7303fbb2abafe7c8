//! Error type for the famcal binary
//!
//! Folds the sub-crate error types into one so command handlers can use
//! `?` freely.

use std::fmt;

/// Unified error type for the famcal binary
#[derive(Debug)]
pub enum FamcalError {
    /// Core error
    Core(famcal_core::Error),
    /// Backend API error
    Api(famcal_api::ApiError),
    /// Assistant error
    Assistant(famcal_assistant::AssistantError),
    /// Geocoding error
    Geo(famcal_geo::GeoError),
    /// Voice error
    Voice(famcal_voice::VoiceError),
    /// Other error
    Other(String),
}

impl fmt::Display for FamcalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "Core error: {}", e),
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Assistant(e) => write!(f, "Assistant error: {}", e),
            Self::Geo(e) => write!(f, "Geocoding error: {}", e),
            Self::Voice(e) => write!(f, "Voice error: {}", e),
            Self::Other(e) => write!(f, "Error: {}", e),
        }
    }
}

impl std::error::Error for FamcalError {}

impl From<famcal_core::Error> for FamcalError {
    fn from(e: famcal_core::Error) -> Self {
        Self::Core(e)
    }
}

impl From<famcal_api::ApiError> for FamcalError {
    fn from(e: famcal_api::ApiError) -> Self {
        Self::Api(e)
    }
}

impl From<famcal_assistant::AssistantError> for FamcalError {
    fn from(e: famcal_assistant::AssistantError) -> Self {
        Self::Assistant(e)
    }
}

impl From<famcal_geo::GeoError> for FamcalError {
    fn from(e: famcal_geo::GeoError) -> Self {
        Self::Geo(e)
    }
}

impl From<famcal_voice::VoiceError> for FamcalError {
    fn from(e: famcal_voice::VoiceError) -> Self {
        Self::Voice(e)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FamcalError>;
