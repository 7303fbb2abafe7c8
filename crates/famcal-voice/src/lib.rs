//! famcal-voice: audio transcription client
//!
//! Uploads captured audio to the backend voice endpoint and returns the
//! transcript plus the structured items parsed from it.

pub mod error;
pub mod transcribe;

pub use error::{Result, VoiceError};
pub use transcribe::{VoiceClient, VoiceResponse};
