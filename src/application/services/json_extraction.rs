//! Pulling structured JSON out of free-text model answers
//!
//! Models wrap JSON in prose, in a fenced code block, or both. Extraction
//! tries the fenced block first, then the widest delimited span.

use serde::de::DeserializeOwned;

use super::PipelineError;
use crate::application::ports::outbound::ProviderError;
use crate::domain::value_objects::{FallbackPolicy, GenerationStep};

/// Top-level JSON shape a stage asks the model for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn delimiters(&self) -> (char, char) {
        match self {
            Self::Object => ('{', '}'),
            Self::Array => ('[', ']'),
        }
    }
}

/// Parse `T` out of a model response, or `None` if no candidate parses.
pub fn extract_json<T: DeserializeOwned>(text: &str, shape: JsonShape) -> Option<T> {
    if let Some(block) = fenced_block(text) {
        if let Ok(value) = serde_json::from_str::<T>(block.trim()) {
            return Some(value);
        }
    }

    let span = delimited_span(text, shape)?;
    serde_json::from_str::<T>(span).ok()
}

/// Extract `T`, resolving a parse failure with the stage's fallback policy
pub fn extract_or_fallback<T, F>(
    text: &str,
    shape: JsonShape,
    step: GenerationStep,
    policy: FallbackPolicy,
    default: F,
) -> Result<T, PipelineError>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    if let Some(value) = extract_json(text, shape) {
        return Ok(value);
    }

    match policy {
        FallbackPolicy::Raise => Err(PipelineError::MalformedResponse { step }),
        FallbackPolicy::DegradeWithDefault => {
            tracing::warn!(
                "{} stage: no parseable JSON in provider response, using defaults",
                step
            );
            Ok(default())
        }
    }
}

/// Answer text from a text provider call
///
/// A reply that arrived but could not be decoded reads as an empty answer, so
/// it reaches the stage's parse policy instead of aborting the run. Transport
/// and HTTP status failures still raise.
pub fn answer_text(
    result: Result<String, ProviderError>,
    step: GenerationStep,
) -> Result<String, PipelineError> {
    match result {
        Ok(answer) => Ok(answer),
        Err(ProviderError::Decode(detail)) => {
            tracing::warn!("{} stage: undecodable provider reply: {}", step, detail);
            Ok(String::new())
        }
        Err(source) => Err(PipelineError::TextProvider { step, source }),
    }
}

/// Content of the first ``` fenced block, without its language tag
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];

    // Skip an info string such as `json` up to the end of the line
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];

    let close = body.find("```")?;
    Some(&body[..close])
}

/// From the first opening delimiter to the last closing one
fn delimited_span(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;

    if start >= end {
        return None;
    }

    Some(&text[start..=end])
}
