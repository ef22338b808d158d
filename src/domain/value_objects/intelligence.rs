//! Market research, competitive intelligence and financial inputs

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Answer text used when the research provider is unavailable
pub const DEFAULT_RESEARCH_ANSWER: &str =
    "Market research data unavailable. Proceeding with available information.";

pub const DEFAULT_POSITIONING: &str = "Differentiated market participant";
pub const DEFAULT_MARKET_SHARE: &str = "Not available";

/// Result of a research provider query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketResearch {
    /// Synthesized answer across all results
    pub answer: String,
    pub results: Vec<ResearchResult>,
    /// The query that produced this research
    pub query: String,
}

impl MarketResearch {
    /// Degraded but valid research used when the provider fails
    pub fn unavailable(query: impl Into<String>) -> Self {
        Self {
            answer: DEFAULT_RESEARCH_ANSWER.to_string(),
            results: Vec::new(),
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

/// Structured competitor landscape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveIntelligence {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(
        default = "default_positioning",
        deserialize_with = "positioning_or_default"
    )]
    pub positioning: String,
    #[serde(
        default = "default_market_share",
        deserialize_with = "market_share_or_default"
    )]
    pub market_share: String,
}

impl Default for CompetitiveIntelligence {
    fn default() -> Self {
        Self {
            competitors: Vec::new(),
            positioning: default_positioning(),
            market_share: default_market_share(),
        }
    }
}

fn default_positioning() -> String {
    DEFAULT_POSITIONING.to_string()
}

fn default_market_share() -> String {
    DEFAULT_MARKET_SHARE.to_string()
}

fn positioning_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::optional_text(deserializer)?.unwrap_or_else(default_positioning))
}

fn market_share_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::optional_text(deserializer)?.unwrap_or_else(default_market_share))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Competitor {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub description: Option<String>,
    /// Free-form metric comparison (revenue, headcount, funding...)
    pub metrics: serde_json::Map<String, serde_json::Value>,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub positioning: Option<String>,
    pub momentum_signals: Vec<String>,
}

/// Normalized financial inputs
///
/// Only `source_files` is populated today: spreadsheet parsing sits behind
/// `FinancialParser` and the shipped parser does not read file contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub revenue: Vec<f64>,
    pub ebitda: Vec<f64>,
    pub margins: Vec<f64>,
    pub growth_rates: Vec<f64>,
    pub assumptions: Vec<String>,
    pub source_files: Vec<String>,
}
