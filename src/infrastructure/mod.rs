//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Provider clients: text generation, Tavily research, Gamma deck building
//! - HTTP: REST API routes
//! - WebSocket: per-run progress streams
//! - Runs: in-memory registry of generation runs
//! - Config: Application configuration
//! - State: Shared application state

pub mod clock;
pub mod config;
pub mod gamma;
pub mod http;
pub mod llm_client;
pub mod runs;
pub mod state;
pub mod tavily;
pub mod websocket;
