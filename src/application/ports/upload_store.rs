use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::TemporaryFile;

#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    /// Persists an uploaded stream under a unique name and hands back ownership of
    /// the resulting file. `original_name` only contributes its extension.
    async fn persist(
        &self,
        field: &str,
        original_name: Option<&str>,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<TemporaryFile, UploadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload failed: {0}")]
    WriteFailed(String),
    #[error("upload is empty")]
    Empty,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
