//! Health Routes
//!
//! - GET /api/health - Service status and provider wiring

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        anthropic_configured: state.generator.has_listing_writer(),
        gemini_configured: state.generator.has_content_writer(),
    })
}
