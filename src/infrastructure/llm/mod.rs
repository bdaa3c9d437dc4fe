mod gemini_client;
mod image_mime;
mod prompts;

pub use gemini_client::GeminiClient;
pub use image_mime::image_mime_type;
pub use prompts::{IMAGE_OBSERVATION_PROMPT, SYMPTOM_TEXT_PROMPT, symptom_prompt};
