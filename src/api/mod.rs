//! HTTP API server for the Aria gateway
//!
//! A thin adapter: receives structured tool calls, validates parameters,
//! forwards to the orchestrator, and serializes results. All sequencing
//! logic lives below, in [`crate::voice`].

pub mod health;
pub mod tools;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::Config;
use crate::voice::VoiceOrchestrator;

/// Shared state for API handlers
pub struct ApiState {
    /// The orchestrator behind every tool call
    pub orchestrator: VoiceOrchestrator,

    /// Default TTS voice reported by the status endpoint
    pub tts_voice: String,

    /// Default TTS model reported by the status endpoint
    pub tts_model: String,
}

impl ApiState {
    /// Build API state from configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when an engine cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            orchestrator: VoiceOrchestrator::from_config(config)?,
            tts_voice: config.tts.voice.clone().unwrap_or_else(|| "alloy".to_string()),
            tts_model: config.tts.model.clone().unwrap_or_else(|| "tts-1".to_string()),
        })
    }
}

/// Build the full API router
#[must_use]
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(health::status_router(state.clone()))
        .nest("/api/tools", tools::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the API on the given port until the process stops
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(state: Arc<ApiState>, port: u16) -> Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
