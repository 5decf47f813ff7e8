//! Content Routes
//!
//! - POST /api/generate-content - Full deliverable for one product name

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{GenerateContentRequest, GenerateContentResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /api/generate-content
///
/// Provider failures fall back to the template, so only validation errors
/// reach the client.
pub async fn generate_content(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateContentRequest>,
) -> ApiResult<Json<GenerateContentResponse>> {
    if req.product_name.trim().is_empty() {
        return Err(ApiError::Validation("productName must not be blank".to_string()));
    }

    Ok(Json(state.generator.content(&req).await))
}
