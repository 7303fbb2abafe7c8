//! Error types for famcal-voice

use thiserror::Error;

/// famcal-voice error type
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VoiceError>;
