//! Pipeline tuning knobs
//!
//! Everything here has a sensible default and can be overridden through
//! `DECKSTUDIO_*` environment variables. Credentials live in `AppConfig`.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::QaVerdictPolicy;

/// What a stage does when a recoverable failure happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Surface the failure to the caller, aborting the run
    Raise,
    /// Log it and continue with the stage's default value
    DegradeWithDefault,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Ok(Self::Raise),
            "degrade" | "degrade_with_default" | "degrade-with-default" => {
                Ok(Self::DegradeWithDefault)
            }
            other => Err(format!("Unknown fallback policy: {}", other)),
        }
    }
}

/// Per-situation fallback policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPolicies {
    /// Unparseable style profile from the text provider
    pub deck_dna_parse: FallbackPolicy,
    /// Unparseable competitor landscape from the text provider
    pub competitive_parse: FallbackPolicy,
    /// Unparseable slide outline from the text provider
    pub architecture_parse: FallbackPolicy,
    /// Research provider request failed
    pub research_transport: FallbackPolicy,
}

impl Default for FallbackPolicies {
    fn default() -> Self {
        Self {
            deck_dna_parse: FallbackPolicy::DegradeWithDefault,
            competitive_parse: FallbackPolicy::DegradeWithDefault,
            architecture_parse: FallbackPolicy::DegradeWithDefault,
            research_transport: FallbackPolicy::DegradeWithDefault,
        }
    }
}

pub const DEFAULT_QA_PASS_PROBABILITY: f64 = 0.9;

/// Clamp a pass probability into `[0, 1]`; NaN and infinities read as the default
pub fn qa_pass_probability_or_default(probability: f64) -> f64 {
    if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        DEFAULT_QA_PASS_PROBABILITY
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    // Deck generation polling
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,

    // Research
    pub research_max_results: u32,
    /// Max characters of serialized research embedded in a prompt
    pub research_prompt_budget_chars: usize,

    // QA
    pub qa_verdict: QaVerdictPolicy,
    pub qa_pass_probability: f64,

    pub fallbacks: FallbackPolicies,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 30_000,
            max_poll_attempts: 20,
            research_max_results: 15,
            research_prompt_budget_chars: 3_000,
            qa_verdict: QaVerdictPolicy::default(),
            qa_pass_probability: DEFAULT_QA_PASS_PROBABILITY,
            fallbacks: FallbackPolicies::default(),
        }
    }
}

impl PipelineSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            poll_interval_ms: env_or("DECKSTUDIO_POLL_INTERVAL_MS", defaults.poll_interval_ms),
            max_poll_attempts: env_or("DECKSTUDIO_MAX_POLL_ATTEMPTS", defaults.max_poll_attempts),
            research_max_results: env_or("DECKSTUDIO_RESEARCH_MAX_RESULTS", defaults.research_max_results),
            research_prompt_budget_chars: env_or("DECKSTUDIO_RESEARCH_PROMPT_BUDGET", defaults.research_prompt_budget_chars),
            qa_verdict: QaVerdictPolicy {
                warning_threshold: env_or("DECKSTUDIO_QA_WARNING_THRESHOLD", defaults.qa_verdict.warning_threshold),
                failure_threshold: env_or("DECKSTUDIO_QA_FAILURE_THRESHOLD", defaults.qa_verdict.failure_threshold),
            },
            qa_pass_probability: qa_pass_probability_or_default(env_or(
                "DECKSTUDIO_QA_PASS_PROBABILITY",
                defaults.qa_pass_probability,
            )),
            fallbacks: FallbackPolicies {
                deck_dna_parse: env_or("DECKSTUDIO_FALLBACK_DECK_DNA", defaults.fallbacks.deck_dna_parse),
                competitive_parse: env_or("DECKSTUDIO_FALLBACK_COMPETITIVE", defaults.fallbacks.competitive_parse),
                architecture_parse: env_or("DECKSTUDIO_FALLBACK_ARCHITECTURE", defaults.fallbacks.architecture_parse),
                research_transport: env_or("DECKSTUDIO_FALLBACK_RESEARCH", defaults.fallbacks.research_transport),
            },
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
