use std::fmt;

use super::temporary_file::TemporaryFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Text,
    Audio,
    Image,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Audio => "audio",
            Modality::Image => "image",
        }
    }

    /// Multipart field carrying the upload, if the modality takes a file.
    pub fn upload_field(&self) -> Option<&'static str> {
        match self {
            Modality::Text => None,
            Modality::Audio => Some("audioFile"),
            Modality::Image => Some("imageFile"),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum AnalysisRequest {
    Text { content: String },
    Audio { file: TemporaryFile },
    Image { file: TemporaryFile },
}

impl AnalysisRequest {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn audio(file: TemporaryFile) -> Self {
        Self::Audio { file }
    }

    pub fn image(file: TemporaryFile) -> Self {
        Self::Image { file }
    }

    pub fn modality(&self) -> Modality {
        match self {
            Self::Text { .. } => Modality::Text,
            Self::Audio { .. } => Modality::Audio,
            Self::Image { .. } => Modality::Image,
        }
    }
}
