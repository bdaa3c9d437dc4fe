use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

/// Client for any Whisper-compatible `/audio/transcriptions` endpoint
/// (Groq by default).
pub struct WhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    language: String,
}

impl WhisperEngine {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";
    pub const DEFAULT_MODEL: &'static str = "whisper-large-v3";

    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        language: &str,
        timeout: Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
            language: language.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl TranscriptionEngine for WhisperEngine {
    #[tracing::instrument(skip(self), fields(model = %self.model, language = %self.language))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let audio_data = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        let mime = mime_guess::from_path(audio_path).first_or_octet_stream();

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str(mime.essence_str())
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "json")
            .part("file", file_part);

        tracing::debug!(endpoint = %self.endpoint, "Sending audio to transcription provider");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::ApiRequestFailed(format!("timed out: {}", e))
                } else {
                    TranscriptionError::ApiRequestFailed(format!("request: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(status = %status, body = %body, "Transcription provider returned an error");
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("parse response: {}", e)))?;

        tracing::info!(chars = result.text.len(), "Transcription completed");

        Ok(result.text.trim().to_string())
    }
}
