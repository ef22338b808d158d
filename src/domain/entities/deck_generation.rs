//! Deck generation job handle
//!
//! A `GammaGeneration` mirrors one asynchronous build job on the deck-building
//! provider. It is never mutated locally; each poll yields a fresh snapshot.
//!
//! ```text
//! pending -> running -> completed
//!    \          \
//!     +----------+----> failed | error
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Error,
}

impl GenerationStatus {
    /// Map a provider status string. Unknown values count as still running.
    pub fn from_provider(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" => Self::Pending,
            "running" | "processing" | "in_progress" => Self::Running,
            "completed" | "complete" | "succeeded" => Self::Completed,
            "failed" => Self::Failed,
            "error" => Self::Error,
            other => {
                tracing::warn!("Unrecognized generation status '{}', treating as running", other);
                Self::Running
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Error)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GammaGeneration {
    pub generation_id: String,
    pub status: GenerationStatus,
    /// Set once the deck is built
    pub gamma_url: Option<String>,
}

impl GammaGeneration {
    pub fn new(generation_id: impl Into<String>, status: GenerationStatus) -> Self {
        Self {
            generation_id: generation_id.into(),
            status,
            gamma_url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.gamma_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_status_mapping() {
        assert_eq!(GenerationStatus::from_provider("completed"), GenerationStatus::Completed);
        assert_eq!(GenerationStatus::from_provider("FAILED"), GenerationStatus::Failed);
        assert_eq!(GenerationStatus::from_provider("pending"), GenerationStatus::Pending);
        assert_eq!(GenerationStatus::from_provider("warming_up"), GenerationStatus::Running);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!GenerationStatus::Pending.is_terminal());
        assert!(!GenerationStatus::Running.is_terminal());
        assert!(GenerationStatus::Completed.is_terminal());
        assert!(GenerationStatus::Failed.is_failure());
        assert!(GenerationStatus::Error.is_failure());
        assert!(!GenerationStatus::Completed.is_failure());
    }
}
