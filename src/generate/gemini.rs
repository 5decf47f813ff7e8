//! Gemini `generateContent` client
//!
//! Writes the long-form deliverable for a chosen product.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{content_prompt, ContentWriter, GenerateContentRequest, GenerateError};

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.8,
            max_output_tokens: 8192,
            request_timeout_ms: 60_000,
        }
    }
}

/// Content writer backed by Gemini
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl ContentWriter for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn write_content(&self, req: &GenerateContentRequest) -> Result<String, GenerateError> {
        let url = format!(
            "{}/v1/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let prompt = content_prompt(req);
        let body = GenerateContentBody {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        tracing::debug!(model = %self.config.model, product = %req.product_name, "requesting content");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(GenerateError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerateError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let reply: GenerateContentReply = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| GenerateError::Parse("reply contained no candidate text".to_string()))
    }
}

// ============================================
// Wire types
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use axum::{extract::Query, routing::post, Json, Router};
    use std::collections::HashMap;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request() -> GenerateContentRequest {
        GenerateContentRequest {
            category: Category::Course,
            product_name: "30日で学ぶ簿記".to_string(),
            target: "経理初心者".to_string(),
            additional_notes: None,
        }
    }

    #[tokio::test]
    async fn test_write_content_returns_first_candidate_text() {
        let router = Router::new().route(
            "/v1/models/*call",
            post(
                |Query(params): Query<HashMap<String, String>>,
                 Json(body): Json<serde_json::Value>| async move {
                    assert_eq!(params.get("key").map(String::as_str), Some("g-key"));
                    assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
                    Json(serde_json::json!({
                        "candidates": [{ "content": { "parts": [{ "text": "# 30日で学ぶ簿記" }] } }]
                    }))
                },
            ),
        );
        let client = GeminiClient::new(GeminiConfig {
            api_key: "g-key".to_string(),
            base_url: spawn_stub(router).await,
            ..Default::default()
        })
        .unwrap();

        let text = client.write_content(&request()).await.unwrap();
        assert_eq!(text, "# 30日で学ぶ簿記");
    }

    #[tokio::test]
    async fn test_empty_candidates_is_a_parse_error() {
        let router = Router::new().route(
            "/v1/models/*call",
            post(|| async { Json(serde_json::json!({ "candidates": [] })) }),
        );
        let client = GeminiClient::new(GeminiConfig {
            api_key: "g-key".to_string(),
            base_url: spawn_stub(router).await,
            ..Default::default()
        })
        .unwrap();

        assert!(matches!(
            client.write_content(&request()).await,
            Err(GenerateError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GeminiClient::new(GeminiConfig {
            api_key: "g-key".to_string(),
            base_url: format!("http://{}", addr),
            ..Default::default()
        })
        .unwrap();

        assert!(matches!(
            client.write_content(&request()).await,
            Err(GenerateError::Unavailable)
        ));
    }
}
