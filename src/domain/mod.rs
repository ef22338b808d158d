//! Domain layer - Core types with no external dependencies
//!
//! This layer contains:
//! - Entities: the deck generation job handle
//! - Value Objects: form inputs, stage artifacts, progress events, QA report
//!   and pipeline settings

pub mod entities;
pub mod value_objects;
