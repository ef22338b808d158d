//! Progress observation port
//!
//! Sinks are invoked synchronously and inline. The pipeline ignores what they
//! do with the event, but an `Err` aborts the run like any stage failure.

use crate::domain::value_objects::GenerationProgress;

#[derive(Debug, thiserror::Error)]
pub enum ProgressSinkError {
    #[error("progress observer closed")]
    Closed,
    #[error("progress observer failed: {0}")]
    Failed(String),
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &GenerationProgress) -> Result<(), ProgressSinkError>;
}

impl<F> ProgressSink for F
where
    F: Fn(&GenerationProgress) -> Result<(), ProgressSinkError> + Send + Sync,
{
    fn emit(&self, event: &GenerationProgress) -> Result<(), ProgressSinkError> {
        self(event)
    }
}

/// Discards every event
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressSink;

#[cfg(test)]
impl ProgressSink for NoopProgressSink {
    fn emit(&self, _event: &GenerationProgress) -> Result<(), ProgressSinkError> {
        Ok(())
    }
}
