use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use crate::application::ports::{InterpretationClient, TranscriptionEngine};
use crate::application::services::ValidationError;
use crate::domain::AnalysisRequest;
use crate::presentation::state::AppState;

use super::responses::{AnalysisResponse, ApiError};

#[derive(Debug, Deserialize)]
pub struct TextAnalysisRequest {
    #[serde(rename = "symptomText", default)]
    pub symptom_text: Option<String>,
}

#[tracing::instrument(skip(state, payload))]
pub async fn analyze_text_handler<T, I>(
    State(state): State<AppState<T, I>>,
    payload: Result<Json<TextAnalysisRequest>, JsonRejection>,
) -> Result<AnalysisResponse, ApiError>
where
    T: TranscriptionEngine + 'static,
    I: InterpretationClient + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected text analysis body");
        ApiError::validation(ValidationError::MalformedRequest)
    })?;

    let content = request.symptom_text.unwrap_or_default();
    let outcome = state.pipeline.analyze(AnalysisRequest::text(content)).await?;

    Ok(outcome.into())
}
