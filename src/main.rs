//! DeckStudio Engine - Backend API for AI-assisted presentation generation
//!
//! The Engine is the backend server that:
//! - Runs the deck generation pipeline (style, research, competitors,
//!   financials, outline, deck build, QA)
//! - Integrates with an OpenAI-compatible text provider, Tavily and Gamma
//! - Streams per-run progress to clients via WebSocket

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::value_objects::PipelineSettings;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deckstudio_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting DeckStudio Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    let settings = PipelineSettings::from_env();
    tracing::info!("Configuration loaded");
    tracing::info!("  LLM: {} ({})", config.llm_base_url, config.llm_model);
    tracing::info!("  Research: {}", config.tavily_base_url);
    tracing::info!("  Deck builder: {}", config.gamma_base_url);
    tracing::info!(
        "  Polling: every {:?}, up to {} attempts",
        settings.poll_interval(),
        settings.max_poll_attempts
    );

    // Initialize application state
    let state = Arc::new(AppState::new(&config, &settings));
    tracing::info!("Application state initialized");

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/ws/generations/{id}",
            get(infrastructure::websocket::ws_handler),
        )
        // Merge REST API routes
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let server = axum::serve(listener, app);

    // Wait for shutdown signal (Ctrl+C)
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, in-flight generation runs are abandoned");
        }
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
