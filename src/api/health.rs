//! Health and status endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe - is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build health router (liveness only, no state needed)
#[must_use]
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Gateway status response for host discovery
#[derive(Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub tools: &'static [&'static str],
    pub tts_voice: String,
    pub tts_model: String,
}

/// Get gateway status including the exposed tools and voice defaults
async fn status(State(state): State<Arc<ApiState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        tools: &["listen_for_speech", "speak_text", "converse"],
        tts_voice: state.tts_voice.clone(),
        tts_model: state.tts_model.clone(),
    })
}

/// Build status router (needs state for voice defaults)
#[must_use]
pub fn status_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .with_state(state)
}
