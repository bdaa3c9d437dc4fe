mod interpretation_client;
mod transcription_engine;
mod upload_store;

pub use interpretation_client::{InterpretationClient, InterpretationError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use upload_store::{UploadError, UploadStore};
