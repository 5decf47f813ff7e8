//! HTTP API Client
//!
//! Functions for communicating with the Rakumane REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use super::types::{
    DashboardSummary, GenerateContentRequest, GenerateContentResponse, GenerateRequest,
    GenerateResponse, HealthResponse, SalesSettings,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8291/api";

/// Local storage key overriding [`DEFAULT_API_BASE`]
const API_URL_KEY: &str = "rakumane_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Turn a response into `T`, or into the server's error message
async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, String> {
    if !response.ok() {
        let message = response
            .json::<ApiError>()
            .await
            .map(|e| e.error.message)
            .unwrap_or_else(|_| fallback.to_string());
        return Err(message);
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Request listing candidates
pub async fn generate(req: &GenerateRequest) -> Result<GenerateResponse, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/generate", api_base))
        .json(req)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response, "Generation failed").await
}

/// Request the full deliverable for one product name
pub async fn generate_content(req: &GenerateContentRequest) -> Result<GenerateContentResponse, String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/generate-content", api_base))
        .json(req)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response, "Content generation failed").await
}

/// Fetch the dashboard summary
pub async fn fetch_sales() -> Result<DashboardSummary, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/sales", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response, "Could not load sales").await
}

/// Save the Gumroad token and monthly goal
pub async fn save_settings(settings: &SalesSettings) -> Result<(), String> {
    let api_base = get_api_base();

    let response = Request::post(&format!("{}/settings", api_base))
        .json(settings)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json::<serde_json::Value>(response, "Saving settings failed")
        .await
        .map(|_| ())
}

/// Check API health
pub async fn check_health() -> Result<HealthResponse, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/health", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response, "API is not healthy").await
}
