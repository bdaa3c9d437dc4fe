use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Exclusive ownership of an uploaded file on local disk.
///
/// The file is removed exactly once: either by an explicit [`TemporaryFile::release`]
/// or, if the owner never reaches it (panic, cancelled request), when the guard drops.
/// Deletion failures are logged and never returned to the caller.
pub struct TemporaryFile {
    path: PathBuf,
    released: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to delete temporary file {path}: {source}")]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl TemporaryFile {
    pub fn acquire(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    pub async fn release(mut self) {
        self.released = true;
        let result = tokio::fs::remove_file(&self.path).await;
        report_cleanup(&self.path, result);
    }
}

impl Drop for TemporaryFile {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let result = std::fs::remove_file(&self.path);
        report_cleanup(&self.path, result);
    }
}

impl fmt::Debug for TemporaryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryFile")
            .field("path", &self.path)
            .field("released", &self.released)
            .finish()
    }
}

fn report_cleanup(path: &Path, result: io::Result<()>) {
    match result {
        Ok(()) => tracing::debug!(path = %path.display(), "Temporary file deleted"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Temporary file already absent");
        }
        Err(e) => {
            let error = CleanupError {
                path: path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %error, "Temporary file cleanup failed");
        }
    }
}
