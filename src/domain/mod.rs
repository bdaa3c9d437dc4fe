mod analysis_outcome;
mod analysis_request;
mod temporary_file;

pub use analysis_outcome::{AnalysisOutcome, DISCLAIMER};
pub use analysis_request::{AnalysisRequest, Modality};
pub use temporary_file::{CleanupError, TemporaryFile};
