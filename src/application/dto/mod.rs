//! Data Transfer Objects for the HTTP API

mod generation;

pub use generation::{
    GenerationRunDto, GenerationRunSummaryDto, RunErrorDto, RunStateDto,
    StartGenerationResponseDto,
};
