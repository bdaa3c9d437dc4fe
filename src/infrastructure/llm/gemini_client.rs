use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{InterpretationClient, InterpretationError};

use super::image_mime::image_mime_type;
use super::prompts::{IMAGE_OBSERVATION_PROMPT, symptom_prompt};

/// Generative Language API client (`models/{model}:generateContent`).
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    text_model: String,
    vision_model: String,
}

impl GeminiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";

    pub fn new(
        base_url: &str,
        api_key: &str,
        text_model: &str,
        vision_model: &str,
        timeout: Duration,
    ) -> Result<Self, InterpretationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InterpretationError::ApiRequestFailed(format!("client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            text_model: text_model.to_string(),
            vision_model: vision_model.to_string(),
        })
    }

    async fn generate(&self, model: &str, parts: Vec<Part>) -> Result<String, InterpretationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InterpretationError::ApiRequestFailed(format!("timed out: {}", e))
                } else {
                    InterpretationError::ApiRequestFailed(format!("request: {}", e))
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(InterpretationError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %text, model, "Generative model returned an error");
            return Err(InterpretationError::ApiRequestFailed(format!(
                "status {}: {}",
                status, text
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| InterpretationError::ApiRequestFailed(format!("body: {}", e)))?;

        let parsed: GenerateContentResponse = serde_json::from_slice(&raw_bytes).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&raw_bytes),
                "Failed to parse generateContent JSON"
            );
            InterpretationError::InvalidResponse(format!("parse response: {}", e))
        })?;

        if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(InterpretationError::Blocked(reason));
        }

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(InterpretationError::InvalidResponse(
                "no text in candidates".to_string(),
            ));
        }

        tracing::info!(chars = text.len(), model, "Generative model completed");

        Ok(text.trim().to_string())
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[async_trait]
impl InterpretationClient for GeminiClient {
    #[tracing::instrument(skip(self, symptoms), fields(model = %self.text_model))]
    async fn interpret_text(&self, symptoms: &str) -> Result<String, InterpretationError> {
        let parts = vec![Part::Text {
            text: symptom_prompt(symptoms),
        }];
        self.generate(&self.text_model, parts).await
    }

    #[tracing::instrument(skip(self), fields(model = %self.vision_model))]
    async fn interpret_image(&self, image_path: &Path) -> Result<String, InterpretationError> {
        let bytes = tokio::fs::read(image_path).await?;
        let mime_type = image_mime_type(image_path, &bytes);

        tracing::debug!(bytes = bytes.len(), mime_type = %mime_type, "Encoding image for vision model");

        let parts = vec![
            Part::Text {
                text: IMAGE_OBSERVATION_PROMPT.to_string(),
            },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type,
                    data: general_purpose::STANDARD.encode(&bytes),
                },
            },
        ];
        self.generate(&self.vision_model, parts).await
    }
}
