use std::sync::Arc;

use crate::application::ports::{InterpretationClient, TranscriptionEngine, UploadStore};
use crate::application::services::AnalysisPipeline;

pub struct AppState<T, I>
where
    T: TranscriptionEngine,
    I: InterpretationClient,
{
    pub pipeline: Arc<AnalysisPipeline<T, I>>,
    pub upload_store: Arc<dyn UploadStore>,
    pub max_upload_bytes: usize,
}

impl<T, I> Clone for AppState<T, I>
where
    T: TranscriptionEngine,
    I: InterpretationClient,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            upload_store: Arc::clone(&self.upload_store),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
