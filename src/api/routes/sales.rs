//! Sales Routes
//!
//! - GET /api/sales - Month-to-date dashboard summary

use axum::{extract::State, Json};
use chrono::Local;
use std::sync::Arc;

use crate::api::dto::DashboardSummary;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::sales::{placeholder_summary, summarize};

/// GET /api/sales
///
/// Without any Gumroad token a zero-valued placeholder is returned so the
/// dashboard can still render.
pub async fn get_sales(State(state): State<Arc<AppState>>) -> ApiResult<Json<DashboardSummary>> {
    let goal = state.settings.monthly_goal().await;

    let Some(token) = state.settings.effective_token().await else {
        tracing::debug!("no Gumroad token, returning placeholder summary");
        return Ok(Json(placeholder_summary(Local::now().date_naive(), goal)));
    };

    let sales = state.gumroad.month_to_date(&token).await?;
    let summary = summarize(&sales, goal);

    tracing::info!(
        sales = summary.total_sales,
        revenue = summary.total_revenue,
        "sales summary built"
    );
    Ok(Json(summary))
}
