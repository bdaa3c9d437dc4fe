/// Appended to every successful analysis, whatever the modality.
pub const DISCLAIMER: &str = "Ces informations sont fournies à titre éducatif uniquement et ne remplacent pas un avis médical professionnel. Consultez un professionnel de santé pour tout problème de santé.";

/// Payload of a completed analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Text {
        interpretation: String,
    },
    Audio {
        transcription: String,
        interpretation: String,
    },
    Image {
        observations: String,
    },
}

impl AnalysisOutcome {
    pub fn transcription(&self) -> Option<&str> {
        match self {
            Self::Audio { transcription, .. } => Some(transcription),
            _ => None,
        }
    }

    pub fn interpretation(&self) -> Option<&str> {
        match self {
            Self::Text { interpretation } | Self::Audio { interpretation, .. } => {
                Some(interpretation)
            }
            Self::Image { .. } => None,
        }
    }

    pub fn observations(&self) -> Option<&str> {
        match self {
            Self::Image { observations } => Some(observations),
            _ => None,
        }
    }

    pub fn disclaimer(&self) -> &'static str {
        DISCLAIMER
    }
}
