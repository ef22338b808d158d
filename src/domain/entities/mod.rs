//! Domain entities - Core objects with identity

mod deck_generation;

pub use deck_generation::{GammaGeneration, GenerationStatus};
