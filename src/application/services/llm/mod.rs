//! Prompt construction for the text and deck-building providers

pub mod prompt_builder;
