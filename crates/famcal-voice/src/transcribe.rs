//! Voice capture upload
//!
//! Posts a recorded audio blob to the backend, which transcribes it and
//! runs the transcript through the same parser as typed assistant input.

use famcal_assistant::InteractResponse;
use famcal_core::config::ApiConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, VoiceError};

/// Response of `POST /api/voice/process`
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceResponse {
    #[serde(default)]
    pub status: Option<String>,
    /// Raw transcript, when the backend includes it
    #[serde(default)]
    pub text: Option<String>,
    /// Structured items parsed from the transcript
    #[serde(default)]
    pub parsed_data: Option<InteractResponse>,
}

/// Client for the voice-processing endpoint
#[derive(Clone)]
pub struct VoiceClient {
    client: Client,
    base_url: String,
}

impl VoiceClient {
    /// Create a new voice client.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            // transcription of longer recordings takes a while
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| VoiceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Upload audio bytes for transcription and parsing.
    pub async fn process(&self, audio_data: &[u8], filename: &str) -> Result<VoiceResponse> {
        let url = format!("{}/api/voice/process", self.base_url);

        info!(
            "Uploading audio: {} bytes, filename: {}",
            audio_data.len(),
            filename
        );

        let mime_type = if filename.ends_with(".webm") {
            "audio/webm"
        } else {
            "audio/mpeg"
        };

        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(audio_data.to_vec())
                .file_name(filename.to_string())
                .mime_str(mime_type)
                .map_err(|e| VoiceError::EncodingError(format!("Failed to set mime type: {}", e)))?,
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VoiceError::TranscriptionFailed(format!(
                "{}: {}",
                status, body
            )));
        }

        let result: VoiceResponse = response
            .json()
            .await
            .map_err(|e| VoiceError::TranscriptionFailed(format!("Failed to parse response: {}", e)))?;

        debug!(
            "Voice processing complete, parsed events: {}",
            result
                .parsed_data
                .as_ref()
                .map(|p| p.events.len())
                .unwrap_or(0)
        );

        Ok(result)
    }

    /// Upload base64-encoded audio.
    pub async fn process_base64(&self, base64_audio: &str, filename: &str) -> Result<VoiceResponse> {
        let audio_data =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, base64_audio)
                .map_err(|e| VoiceError::DecodingError(format!("Invalid base64: {}", e)))?;

        self.process(&audio_data, filename).await
    }
}
