//! Listing Routes
//!
//! - POST /api/generate - Three name candidates, description, price, tags

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{GenerateRequest, GenerateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /api/generate
pub async fn generate_listing(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    if req.target.trim().is_empty() {
        return Err(ApiError::Validation("target must not be blank".to_string()));
    }

    let listing = state.generator.listing(&req).await?;
    Ok(Json(listing))
}
