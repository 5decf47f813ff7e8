//! Data Transfer Objects
//!
//! Response types owned by the API layer. Generation and sales payloads
//! live next to their domain modules and are re-exported here.

use serde::{Deserialize, Serialize};

pub use crate::generate::{
    GenerateContentRequest, GenerateContentResponse, GenerateRequest, GenerateResponse,
};
pub use crate::sales::{DashboardSummary, SalesSettings, SettingsView};

/// Acknowledgement body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "healthy"
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub anthropic_configured: bool,
    pub gemini_configured: bool,
}
