use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::application::ports::{UploadError, UploadStore};
use crate::domain::TemporaryFile;

/// Writes uploads into a single shared directory, one uniquely named file per upload.
pub struct LocalUploadStore {
    base_path: PathBuf,
}

impl LocalUploadStore {
    pub fn new(base_path: PathBuf) -> Result<Self, UploadError> {
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn unique_path(&self, field: &str, original_name: Option<&str>) -> PathBuf {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();
        self.base_path
            .join(format!("{}-{}{}", field, Uuid::new_v4(), extension))
    }
}

#[async_trait::async_trait]
impl UploadStore for LocalUploadStore {
    #[tracing::instrument(skip(self, stream))]
    async fn persist(
        &self,
        field: &str,
        original_name: Option<&str>,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<TemporaryFile, UploadError> {
        let path = self.unique_path(field, original_name);
        let mut file = tokio::fs::File::create(&path).await?;
        // Owns the partial file from here on so any early return removes it.
        let temporary = TemporaryFile::acquire(path);

        let mut total_bytes: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    drop(file);
                    temporary.release().await;
                    return Err(UploadError::Io(e));
                }
            };
            total_bytes += bytes.len() as u64;
            if let Err(e) = file.write_all(&bytes).await {
                drop(file);
                temporary.release().await;
                return Err(UploadError::WriteFailed(e.to_string()));
            }
        }

        if let Err(e) = file.flush().await {
            drop(file);
            temporary.release().await;
            return Err(UploadError::WriteFailed(e.to_string()));
        }
        drop(file);

        if total_bytes == 0 {
            temporary.release().await;
            return Err(UploadError::Empty);
        }

        tracing::debug!(
            path = %temporary.path().display(),
            bytes = total_bytes,
            "Upload persisted"
        );

        Ok(temporary)
    }
}
