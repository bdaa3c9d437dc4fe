use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::infrastructure::audio::WhisperEngine;
use crate::infrastructure::llm::GeminiClient;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub uploads: UploadSettings,
    pub transcription: TranscriptionSettings,
    pub interpretation: InterpretationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl TranscriptionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterpretationSettings {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub vision_model: String,
    pub timeout_secs: u64,
}

impl InterpretationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("missing required secret: {0}")]
    MissingSecret(&'static str),
}

impl Settings {
    /// Layers defaults, `appsettings.{environment}.toml`, `APP__*` variables and
    /// the conventional provider variables, in that order of precedence.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let config = Self::builder()?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("transcription.api_key", std::env::var("GROQ_API_KEY").ok())?
            .set_override_option("interpretation.api_key", std::env::var("GEMINI_API_KEY").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("uploads.dir", std::env::var("UPLOAD_DIR").ok())?
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Builder preloaded with every default; secrets have none.
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("uploads.dir", "uploads")?
            .set_default("uploads.max_file_size_mb", 25)?
            .set_default("transcription.api_key", "")?
            .set_default("transcription.base_url", WhisperEngine::DEFAULT_BASE_URL)?
            .set_default("transcription.model", WhisperEngine::DEFAULT_MODEL)?
            .set_default("transcription.language", "fr")?
            .set_default("transcription.timeout_secs", 60)?
            .set_default("interpretation.api_key", "")?
            .set_default("interpretation.base_url", GeminiClient::DEFAULT_BASE_URL)?
            .set_default("interpretation.text_model", GeminiClient::DEFAULT_MODEL)?
            .set_default("interpretation.vision_model", GeminiClient::DEFAULT_MODEL)?
            .set_default("interpretation.timeout_secs", 60)?
            .set_default("logging.level", "info,symptom_relay=debug,tower_http=debug")?
            .set_default("logging.json", false)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.transcription.api_key.trim().is_empty() {
            return Err(SettingsError::MissingSecret("transcription.api_key"));
        }
        if self.interpretation.api_key.trim().is_empty() {
            return Err(SettingsError::MissingSecret("interpretation.api_key"));
        }
        Ok(())
    }
}
