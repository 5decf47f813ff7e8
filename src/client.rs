//! Rakumane API Client
//!
//! Typed HTTP client for the backend, used by `rakumane-cli`.

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::api::dto::{HealthResponse, StatusResponse};
use crate::generate::{
    GenerateContentRequest, GenerateContentResponse, GenerateRequest, GenerateResponse,
};
use crate::sales::{DashboardSummary, SalesSettings, SettingsView};

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://localhost:8291";

/// Backend API client
pub struct RakumaneClient {
    client: Client,
    base_url: String,
}

impl RakumaneClient {
    /// Create a client for `base_url`.
    ///
    /// Generation calls wait on upstream models, so the timeout is generous.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(180))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, ClientError> {
        self.post("/api/generate", req).await
    }

    pub async fn generate_content(
        &self,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ClientError> {
        self.post("/api/generate-content", req).await
    }

    pub async fn sales(&self) -> Result<DashboardSummary, ClientError> {
        self.get("/api/sales").await
    }

    pub async fn save_settings(&self, settings: &SalesSettings) -> Result<StatusResponse, ClientError> {
        self.post("/api/settings", settings).await
    }

    pub async fn settings(&self) -> Result<SettingsView, ClientError> {
        self.get("/api/settings").await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/api/health").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await.map_err(classify)?;
        decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify)?;
        decode(response).await
    }
}

fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text);

    Err(ClientError::ApiError {
        status: status.as_u16(),
        message,
    })
}

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("backend unavailable")]
    Unavailable,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("request timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_router, AppState};
    use crate::catalog::Category;
    use crate::generate::ProductGenerator;
    use crate::sales::{GumroadClient, GumroadConfig, SettingsStore, DEFAULT_MONTHLY_GOAL};

    async fn spawn_backend() -> RakumaneClient {
        let gumroad = GumroadClient::new(GumroadConfig::default()).unwrap();
        let state = AppState::new(
            ProductGenerator::offline(),
            gumroad,
            SettingsStore::new("", DEFAULT_MONTHLY_GOAL),
        );
        let router = build_router(state, "http://localhost:5173");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        RakumaneClient::new(format!("http://{}/", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_then_content() {
        let client = spawn_backend().await;

        let listing = client
            .generate(&GenerateRequest {
                category: Category::Figma,
                target: "UIデザイナー".to_string(),
                additional_notes: None,
            })
            .await
            .unwrap();
        assert_eq!(listing.product_names.len(), 3);
        assert_eq!(listing.suggested_price, 3250);

        let content = client
            .generate_content(&GenerateContentRequest {
                category: Category::Figma,
                product_name: listing.product_names[0].clone(),
                target: "UIデザイナー".to_string(),
                additional_notes: None,
            })
            .await
            .unwrap();
        assert!(content.filename.ends_with(".md"));
    }

    #[tokio::test]
    async fn test_validation_error_message_is_extracted() {
        let client = spawn_backend().await;

        let err = client
            .generate(&GenerateRequest {
                category: Category::Prompt,
                target: String::new(),
                additional_notes: None,
            })
            .await
            .unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("target"));
            }
            other => panic!("expected ApiError, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_settings_and_sales() {
        let client = spawn_backend().await;

        client
            .save_settings(&SalesSettings {
                gumroad_token: String::new(),
                monthly_goal: 40_000,
            })
            .await
            .unwrap();

        let view = client.settings().await.unwrap();
        assert_eq!(view.gumroad_token, "");
        assert_eq!(view.monthly_goal, 40_000);

        let summary = client.sales().await.unwrap();
        assert_eq!(summary.monthly_goal, 40_000);
        assert_eq!(summary.daily_sales.len(), 14);

        assert_eq!(client.health().await.unwrap().status, "healthy");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RakumaneClient::new(format!("http://{}", addr)).unwrap();
        assert!(matches!(client.health().await, Err(ClientError::Unavailable)));
    }
}
