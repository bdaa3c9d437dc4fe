use axum::extract::{Multipart, State};

use crate::application::ports::{InterpretationClient, TranscriptionEngine};
use crate::domain::{AnalysisRequest, Modality};
use crate::presentation::state::AppState;

use super::responses::{AnalysisResponse, ApiError};
use super::upload::receive_upload;

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_image_handler<T, I>(
    State(state): State<AppState<T, I>>,
    mut multipart: Multipart,
) -> Result<AnalysisResponse, ApiError>
where
    T: TranscriptionEngine + 'static,
    I: InterpretationClient + 'static,
{
    let file = receive_upload(&mut multipart, Modality::Image, state.upload_store.as_ref()).await?;
    let outcome = state.pipeline.analyze(AnalysisRequest::image(file)).await?;

    Ok(outcome.into())
}
