use std::fmt;
use std::sync::Arc;

use crate::application::ports::{
    InterpretationClient, InterpretationError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AnalysisOutcome, AnalysisRequest, Modality, TemporaryFile};
use crate::infrastructure::observability::sanitize_prompt;

/// Chains transcription and interpretation for one request and owns the
/// deletion of any uploaded file it is handed.
pub struct AnalysisPipeline<T, I>
where
    T: TranscriptionEngine,
    I: InterpretationClient,
{
    transcription_engine: Arc<T>,
    interpretation_client: Arc<I>,
}

impl<T, I> AnalysisPipeline<T, I>
where
    T: TranscriptionEngine,
    I: InterpretationClient,
{
    pub fn new(transcription_engine: Arc<T>, interpretation_client: Arc<I>) -> Self {
        Self {
            transcription_engine,
            interpretation_client,
        }
    }

    #[tracing::instrument(skip_all, fields(modality = %request.modality()))]
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, AnalysisError> {
        tracing::debug!(stage = %PipelineStage::Received, "Analysis request received");

        let result = match request {
            AnalysisRequest::Text { content } => self.analyze_text(&content).await,
            AnalysisRequest::Audio { file } => self.analyze_audio(file).await,
            AnalysisRequest::Image { file } => self.analyze_image(file).await,
        };

        match &result {
            Ok(_) => tracing::info!(stage = %PipelineStage::Completed, "Analysis completed"),
            Err(e) if e.is_client_error() => {
                tracing::warn!(stage = %PipelineStage::Failed, error = %e, "Analysis rejected");
            }
            Err(e) => {
                tracing::error!(stage = %PipelineStage::Failed, error = %e, "Analysis failed");
            }
        }

        result
    }

    async fn analyze_text(&self, content: &str) -> Result<AnalysisOutcome, AnalysisError> {
        if content.trim().is_empty() {
            return Err(ValidationError::MissingSymptomText.into());
        }
        tracing::debug!(
            stage = %PipelineStage::Interpreting,
            symptoms = %sanitize_prompt(content),
            "Interpreting symptom text"
        );

        let interpretation = self
            .interpretation_client
            .interpret_text(content)
            .await
            .map_err(AnalysisError::InterpretationFailed)?;

        Ok(AnalysisOutcome::Text { interpretation })
    }

    async fn analyze_audio(&self, file: TemporaryFile) -> Result<AnalysisOutcome, AnalysisError> {
        if !file.exists().await {
            file.release().await;
            return Err(ValidationError::MissingFile(Modality::Audio).into());
        }
        tracing::debug!(stage = %PipelineStage::Transcribing, path = %file.path().display(), "Transcribing audio");

        let transcribed = self.transcription_engine.transcribe(file.path()).await;
        file.release().await;
        let transcription = transcribed.map_err(AnalysisError::TranscriptionFailed)?;

        tracing::debug!(
            stage = %PipelineStage::Interpreting,
            chars = transcription.len(),
            "Interpreting transcription"
        );

        let interpretation = self
            .interpretation_client
            .interpret_text(&transcription)
            .await
            .map_err(AnalysisError::InterpretationFailed)?;

        Ok(AnalysisOutcome::Audio {
            transcription,
            interpretation,
        })
    }

    async fn analyze_image(&self, file: TemporaryFile) -> Result<AnalysisOutcome, AnalysisError> {
        if !file.exists().await {
            file.release().await;
            return Err(ValidationError::MissingFile(Modality::Image).into());
        }
        tracing::debug!(stage = %PipelineStage::Interpreting, path = %file.path().display(), "Interpreting image");

        let interpreted = self.interpretation_client.interpret_image(file.path()).await;
        file.release().await;
        let observations = interpreted.map_err(AnalysisError::ImageInterpretationFailed)?;

        Ok(AnalysisOutcome::Image { observations })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Transcribing,
    Interpreting,
    Completed,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Transcribing => "transcribing",
            PipelineStage::Interpreting => "interpreting",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Veuillez fournir une description de vos symptômes.")]
    MissingSymptomText,
    #[error("{}", missing_file_message(.0))]
    MissingFile(Modality),
    #[error("Requête invalide.")]
    MalformedRequest,
}

fn missing_file_message(modality: &Modality) -> &'static str {
    match modality {
        Modality::Audio => "Aucun fichier audio reçu.",
        Modality::Image => "Aucune image reçue.",
        Modality::Text => "Aucun fichier reçu.",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("transcription: {0}")]
    TranscriptionFailed(#[source] TranscriptionError),
    #[error("interpretation: {0}")]
    InterpretationFailed(#[source] InterpretationError),
    #[error("image interpretation: {0}")]
    ImageInterpretationFailed(#[source] InterpretationError),
}

impl AnalysisError {
    /// Stable text safe to return to the client. Causes stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(e) => e.to_string(),
            AnalysisError::TranscriptionFailed(_) => {
                "Erreur lors de la transcription de l'audio.".to_string()
            }
            AnalysisError::InterpretationFailed(_) => {
                "Erreur lors de l'interprétation des symptômes.".to_string()
            }
            AnalysisError::ImageInterpretationFailed(_) => {
                "Erreur lors de l'analyse de l'image.".to_string()
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalysisError::Validation(_))
    }
}
