use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use symptom_relay::application::services::{AnalysisError, AnalysisPipeline, ValidationError};
use symptom_relay::domain::{AnalysisOutcome, AnalysisRequest, Modality, TemporaryFile};

use crate::helpers::{
    INTERPRETATION, OBSERVATIONS, RecordingInterpretationClient, RecordingTranscriptionEngine,
    StalledTranscriptionEngine, TRANSCRIPT, file_count, write_upload,
};

fn pipeline(
    engine: &Arc<RecordingTranscriptionEngine>,
    client: &Arc<RecordingInterpretationClient>,
) -> AnalysisPipeline<RecordingTranscriptionEngine, RecordingInterpretationClient> {
    AnalysisPipeline::new(Arc::clone(engine), Arc::clone(client))
}

#[tokio::test]
async fn given_symptom_text_when_analyzing_then_returns_interpretation_without_transcribing() {
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());

    let outcome = pipeline(&engine, &client)
        .analyze(AnalysisRequest::text("fièvre et toux depuis 3 jours"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        AnalysisOutcome::Text {
            interpretation: INTERPRETATION.to_string()
        }
    );
    assert_eq!(engine.call_count(), 0);
    assert_eq!(client.text_call_count(), 1);
    assert_eq!(
        client.texts.lock().unwrap().as_slice(),
        ["fièvre et toux depuis 3 jours".to_string()]
    );
}

#[tokio::test]
async fn given_same_text_twice_when_analyzing_then_results_are_independent() {
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());
    let pipeline = pipeline(&engine, &client);

    let first = pipeline
        .analyze(AnalysisRequest::text("maux de tête"))
        .await
        .unwrap();
    let second = pipeline
        .analyze(AnalysisRequest::text("maux de tête"))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(client.text_call_count(), 2);
}

#[tokio::test]
async fn given_blank_text_when_analyzing_then_fails_validation_before_remote_calls() {
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());

    let result = pipeline(&engine, &client)
        .analyze(AnalysisRequest::text("   \n"))
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::Validation(ValidationError::MissingSymptomText))
    ));
    assert_eq!(client.text_call_count(), 0);
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn given_text_interpretation_failure_when_analyzing_then_returns_interpretation_failed() {
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::failing_text());

    let result = pipeline(&engine, &client)
        .analyze(AnalysisRequest::text("nausées"))
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, AnalysisError::InterpretationFailed(_)));
    assert!(!error.is_client_error());
    assert!(!error.user_message().contains("503"));
}

#[tokio::test]
async fn given_audio_file_when_analyzing_then_transcribes_once_interprets_once_and_deletes_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());
    let file = write_upload(dir.path(), "audioFile-1.webm", b"fake audio");

    let outcome = pipeline(&engine, &client)
        .analyze(AnalysisRequest::audio(file))
        .await
        .unwrap();

    assert_eq!(outcome.transcription(), Some(TRANSCRIPT));
    assert_eq!(outcome.interpretation(), Some(INTERPRETATION));
    assert_eq!(engine.call_count(), 1);
    assert_eq!(engine.file_present_on_call.lock().unwrap().as_slice(), [true]);
    assert_eq!(client.text_call_count(), 1);
    assert_eq!(client.texts.lock().unwrap().as_slice(), [TRANSCRIPT.to_string()]);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_transcription_failure_when_analyzing_audio_then_skips_interpretation_and_deletes_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(RecordingTranscriptionEngine::failing());
    let client = Arc::new(RecordingInterpretationClient::default());
    let file = write_upload(dir.path(), "audioFile-2.mp3", b"fake audio");

    let result = pipeline(&engine, &client)
        .analyze(AnalysisRequest::audio(file))
        .await;

    assert!(matches!(result, Err(AnalysisError::TranscriptionFailed(_))));
    assert_eq!(engine.call_count(), 1);
    assert_eq!(client.text_call_count(), 0);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_interpretation_failure_after_transcription_when_analyzing_audio_then_file_is_deleted() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::failing_text());
    let file = write_upload(dir.path(), "audioFile-3.wav", b"fake audio");

    let result = pipeline(&engine, &client)
        .analyze(AnalysisRequest::audio(file))
        .await;

    assert!(matches!(result, Err(AnalysisError::InterpretationFailed(_))));
    assert_eq!(engine.call_count(), 1);
    assert_eq!(client.text_call_count(), 1);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_missing_audio_file_when_analyzing_then_fails_validation_without_remote_calls() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());
    let file = TemporaryFile::acquire(dir.path().join("never-written.webm"));

    let result = pipeline(&engine, &client)
        .analyze(AnalysisRequest::audio(file))
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::Validation(ValidationError::MissingFile(
            Modality::Audio
        )))
    ));
    assert_eq!(engine.call_count(), 0);
    assert_eq!(client.text_call_count(), 0);
}

#[tokio::test]
async fn given_image_file_when_analyzing_then_returns_observations_and_deletes_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());
    let file = write_upload(dir.path(), "imageFile-1.jpg", &[0xFF, 0xD8, 0xFF, 0xE0]);
    let image_path = file.path().to_path_buf();

    let outcome = pipeline(&engine, &client)
        .analyze(AnalysisRequest::image(file))
        .await
        .unwrap();

    assert_eq!(outcome.observations(), Some(OBSERVATIONS));
    assert_eq!(outcome.interpretation(), None);
    assert_eq!(client.image_call_count(), 1);
    assert_eq!(client.images.lock().unwrap().as_slice(), [image_path]);
    assert_eq!(client.text_call_count(), 0);
    assert_eq!(engine.call_count(), 0);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_image_interpretation_failure_when_analyzing_then_file_is_still_deleted() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::failing_image());
    let file = write_upload(dir.path(), "imageFile-2.png", b"\x89PNG\r\n\x1a\n");

    let result = pipeline(&engine, &client)
        .analyze(AnalysisRequest::image(file))
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, AnalysisError::ImageInterpretationFailed(_)));
    assert_eq!(error.user_message(), "Erreur lors de l'analyse de l'image.");
    assert_eq!(client.image_call_count(), 1);
    assert_eq!(file_count(dir.path()), 0);
}

#[tokio::test]
async fn given_missing_image_file_when_analyzing_then_fails_validation_without_remote_calls() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(RecordingTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());
    let file = TemporaryFile::acquire(dir.path().join("absent.jpg"));

    let result = pipeline(&engine, &client)
        .analyze(AnalysisRequest::image(file))
        .await;

    let error = result.unwrap_err();
    assert!(error.is_client_error());
    assert_eq!(error.user_message(), "Aucune image reçue.");
    assert_eq!(client.image_call_count(), 0);
}

#[tokio::test]
async fn given_analysis_cancelled_mid_transcription_when_future_is_dropped_then_file_is_deleted() {
    let dir = tempfile::TempDir::new().unwrap();
    let engine = Arc::new(StalledTranscriptionEngine::default());
    let client = Arc::new(RecordingInterpretationClient::default());
    let pipeline = AnalysisPipeline::new(Arc::clone(&engine), Arc::clone(&client));
    let file = write_upload(dir.path(), "audioFile-4.ogg", b"fake audio");

    let result = tokio::time::timeout(
        Duration::from_millis(50),
        pipeline.analyze(AnalysisRequest::audio(file)),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(engine.started.load(Ordering::SeqCst), 1);
    assert_eq!(client.text_call_count(), 0);
    assert_eq!(file_count(dir.path()), 0);
}
