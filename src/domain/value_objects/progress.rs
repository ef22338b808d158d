//! Progress events emitted while a presentation is generated

use serde::{Deserialize, Serialize};

/// Which stage a progress event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationStep {
    #[serde(rename = "deckDNA")]
    DeckDna,
    #[serde(rename = "research")]
    Research,
    #[serde(rename = "competitive")]
    Competitive,
    #[serde(rename = "financial")]
    Financial,
    #[serde(rename = "architecture")]
    Architecture,
    #[serde(rename = "gamma")]
    Gamma,
    #[serde(rename = "qa")]
    Qa,
    #[serde(rename = "error")]
    Error,
}

impl GenerationStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeckDna => "deckDNA",
            Self::Research => "research",
            Self::Competitive => "competitive",
            Self::Financial => "financial",
            Self::Architecture => "architecture",
            Self::Gamma => "gamma",
            Self::Qa => "qa",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Pending,
    Running,
    Completed,
    Error,
}

/// A point-in-time notification about the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationProgress {
    pub step: GenerationStep,
    /// 0-100 across the whole run
    pub progress: u8,
    pub status: ProgressStatus,
    pub message: String,
}

impl GenerationProgress {
    pub fn running(step: GenerationStep, progress: u8, message: impl Into<String>) -> Self {
        Self {
            step,
            progress,
            status: ProgressStatus::Running,
            message: message.into(),
        }
    }

    pub fn completed(step: GenerationStep, progress: u8, message: impl Into<String>) -> Self {
        Self {
            step,
            progress,
            status: ProgressStatus::Completed,
            message: message.into(),
        }
    }

    pub fn error(progress: u8, message: impl Into<String>) -> Self {
        Self {
            step: GenerationStep::Error,
            progress,
            status: ProgressStatus::Error,
            message: message.into(),
        }
    }

    /// True for the last event a run emits
    pub fn is_terminal(&self) -> bool {
        self.status == ProgressStatus::Error
            || (self.step == GenerationStep::Qa && self.status == ProgressStatus::Completed)
    }
}
