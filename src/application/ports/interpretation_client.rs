use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait InterpretationClient: Send + Sync {
    /// Educational, non-diagnostic commentary on a free-text symptom description.
    async fn interpret_text(&self, symptoms: &str) -> Result<String, InterpretationError>;

    /// Visual observations on the image stored at `image_path`.
    /// Deleting the file is left to the caller.
    async fn interpret_image(&self, image_path: &Path) -> Result<String, InterpretationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    #[error("failed to read image file: {0}")]
    ReadFailed(#[from] std::io::Error),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("response blocked: {0}")]
    Blocked(String),
}
