//! Settings Routes
//!
//! - POST /api/settings - Save Gumroad token and monthly goal
//! - GET /api/settings - Read them back with the token masked

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{SalesSettings, SettingsView, StatusResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /api/settings
pub async fn save_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SalesSettings>,
) -> ApiResult<Json<StatusResponse>> {
    if req.monthly_goal <= 0 {
        return Err(ApiError::Validation(
            "monthlyGoal must be greater than 0".to_string(),
        ));
    }

    state.settings.save(req).await;
    Ok(Json(StatusResponse::ok()))
}

/// GET /api/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsView> {
    Json(state.settings.view().await)
}
