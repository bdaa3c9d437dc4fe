mod whisper_engine;

pub use whisper_engine::WhisperEngine;
