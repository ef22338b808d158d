//! Outbound ports - Interfaces that the application requires from external systems

mod deck_builder_port;
mod progress_port;
mod research_port;
mod sleeper_port;
mod text_generation_port;

pub use deck_builder_port::{DeckBuilderPort, DeckBuildRequest};
pub use progress_port::{ProgressSink, ProgressSinkError};
#[cfg(test)]
pub use progress_port::NoopProgressSink;
pub use research_port::{ResearchPort, ResearchQuery, ResearchResponse};
pub use sleeper_port::SleeperPort;
pub use text_generation_port::{ProviderError, TextGenerationPort, TextRequest};
