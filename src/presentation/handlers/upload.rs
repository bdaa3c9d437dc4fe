use std::io;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use futures::{StreamExt, TryStreamExt};

use crate::application::ports::{UploadError, UploadStore};
use crate::application::services::ValidationError;
use crate::domain::{Modality, TemporaryFile};

use super::responses::ApiError;

/// Persists the multipart field named for `modality`, skipping any other field.
pub async fn receive_upload(
    multipart: &mut Multipart,
    modality: Modality,
    store: &dyn UploadStore,
) -> Result<TemporaryFile, ApiError> {
    let Some(expected) = modality.upload_field() else {
        return Err(ApiError::validation(ValidationError::MissingFile(modality)));
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!(field = expected, "Upload request without the expected file");
                return Err(ApiError::validation(ValidationError::MissingFile(modality)));
            }
            Err(e) => return Err(multipart_error(&e)),
        };

        if field.name() != Some(expected) {
            tracing::debug!(field = ?field.name(), "Skipping unexpected multipart field");
            continue;
        }

        let original_name = field.file_name().map(str::to_owned);
        tracing::debug!(
            field = expected,
            filename = ?original_name,
            content_type = ?field.content_type(),
            "Receiving upload"
        );

        let stream = field.map_err(io::Error::other).boxed();
        return match store
            .persist(expected, original_name.as_deref(), stream)
            .await
        {
            Ok(file) => Ok(file),
            Err(UploadError::Empty) => {
                Err(ApiError::validation(ValidationError::MissingFile(modality)))
            }
            Err(UploadError::Io(e)) => Err(stream_error(e)),
            Err(e) => Err(ApiError::Storage(e)),
        };
    }
}

fn stream_error(error: io::Error) -> ApiError {
    match error
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
    {
        Some(multipart) => multipart_error(multipart),
        None => ApiError::Storage(UploadError::Io(error)),
    }
}

fn multipart_error(error: &MultipartError) -> ApiError {
    tracing::warn!(error = %error, "Failed to read multipart body");
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::validation(ValidationError::MalformedRequest)
    }
}
