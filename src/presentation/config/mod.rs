mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    InterpretationSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    TranscriptionSettings, UploadSettings,
};
