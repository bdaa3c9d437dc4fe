mod analyze_audio;
mod analyze_image;
mod analyze_text;
mod health;
mod not_found;
mod responses;
mod upload;

pub use analyze_audio::analyze_audio_handler;
pub use analyze_image::analyze_image_handler;
pub use analyze_text::{TextAnalysisRequest, analyze_text_handler};
pub use health::health_handler;
pub use not_found::{method_not_allowed_handler, not_found_handler};
pub use responses::{AnalysisResponse, ApiError, ErrorResponse};
