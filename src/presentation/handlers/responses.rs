use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::UploadError;
use crate::application::services::{AnalysisError, ValidationError};
use crate::domain::AnalysisOutcome;

const SUCCESS: &str = "success";
const ERROR: &str = "error";

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub disclaimer: &'static str,
}

impl From<AnalysisOutcome> for AnalysisResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        let disclaimer = outcome.disclaimer();
        let (transcription, interpretation, observations) = match outcome {
            AnalysisOutcome::Text { interpretation } => (None, Some(interpretation), None),
            AnalysisOutcome::Audio {
                transcription,
                interpretation,
            } => (Some(transcription), Some(interpretation), None),
            AnalysisOutcome::Image { observations } => (None, None, Some(observations)),
        };
        Self {
            status: SUCCESS,
            transcription,
            interpretation,
            observations,
            disclaimer,
        }
    }
}

impl IntoResponse for AnalysisResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Every failure a handler can surface. The body only ever carries a stable message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("upload exceeds the configured size limit")]
    PayloadTooLarge,
    #[error("storing upload: {0}")]
    Storage(UploadError),
    #[error("route not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn validation(error: ValidationError) -> Self {
        Self::Analysis(AnalysisError::Validation(error))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Analysis(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Analysis(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ApiError::Analysis(e) => e.user_message(),
            ApiError::PayloadTooLarge => "Le fichier envoyé est trop volumineux.".to_string(),
            ApiError::Storage(_) => "Erreur lors de l'enregistrement du fichier.".to_string(),
            ApiError::NotFound => "Route introuvable.".to_string(),
            ApiError::MethodNotAllowed => "Méthode non autorisée.".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (
            status,
            Json(ErrorResponse {
                status: ERROR,
                message: self.user_message(),
            }),
        )
            .into_response()
    }
}
