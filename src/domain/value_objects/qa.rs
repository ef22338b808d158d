//! Quality report attached to a generated deck

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The quality check categories every deck is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaCategory {
    TextOverflow,
    FontConsistency,
    ColorPalette,
    CitationCompleteness,
    NumberFormatting,
    ChartLabelCollisions,
    TableFormatting,
    NarrativeFlow,
}

impl QaCategory {
    pub const ALL: [QaCategory; 8] = [
        Self::TextOverflow,
        Self::FontConsistency,
        Self::ColorPalette,
        Self::CitationCompleteness,
        Self::NumberFormatting,
        Self::ChartLabelCollisions,
        Self::TableFormatting,
        Self::NarrativeFlow,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TextOverflow => "Text overflow",
            Self::FontConsistency => "Font consistency",
            Self::ColorPalette => "Color palette adherence",
            Self::CitationCompleteness => "Citation completeness",
            Self::NumberFormatting => "Number format consistency",
            Self::ChartLabelCollisions => "Chart label collisions",
            Self::TableFormatting => "Table formatting",
            Self::NarrativeFlow => "Narrative flow",
        }
    }

    /// A failure in a critical category is also reported as a critical issue
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::TextOverflow | Self::CitationCompleteness)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QaStatus {
    Pass,
    PassWithWarnings,
    Fail,
}

/// Failure-count thresholds that turn check results into a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaVerdictPolicy {
    /// At or above this many failed checks the deck passes with warnings
    pub warning_threshold: u32,
    /// At or above this many failed checks the deck fails
    pub failure_threshold: u32,
}

impl Default for QaVerdictPolicy {
    fn default() -> Self {
        Self {
            warning_threshold: 3,
            failure_threshold: 6,
        }
    }
}

impl QaVerdictPolicy {
    pub fn verdict(&self, checks_failed: u32) -> QaStatus {
        if checks_failed >= self.failure_threshold {
            QaStatus::Fail
        } else if checks_failed >= self.warning_threshold {
            QaStatus::PassWithWarnings
        } else {
            QaStatus::Pass
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaValidation {
    pub timestamp: DateTime<Utc>,
    pub overall_status: QaStatus,
    pub checks_passed: u32,
    pub checks_failed: u32,
    pub checks_total: u32,
    pub critical_issues: Vec<String>,
    pub warnings: Vec<String>,
    pub presentation_url: Option<String>,
}
