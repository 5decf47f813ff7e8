//! Anthropic Messages API client
//!
//! Asks Claude for listing candidates and extracts the JSON object from
//! its reply.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{listing_prompt, GenerateError, GenerateRequest, GenerateResponse, ListingWriter};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Configuration for the Claude client
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    /// Base URL (e.g., "https://api.anthropic.com")
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-haiku-4-5".to_string(),
            max_tokens: 1024,
            request_timeout_ms: 60_000,
        }
    }
}

/// Listing writer backed by Claude
pub struct ClaudeClient {
    client: Client,
    config: ClaudeConfig,
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClaudeConfig {
        &self.config
    }

    /// Send one user turn and return the concatenated text blocks
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));

        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        let text: String = reply
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(GenerateError::Parse("reply contained no text".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl ListingWriter for ClaudeClient {
    fn name(&self) -> &str {
        "claude"
    }

    async fn write_listing(&self, req: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let prompt = listing_prompt(req);
        tracing::debug!(model = %self.config.model, category = %req.category, "requesting listing");
        let text = self.complete(&prompt).await?;
        parse_listing(&text)
    }
}

/// Pull the outermost `{ ... }` span out of a model reply and decode it
pub(crate) fn parse_listing(text: &str) -> Result<GenerateResponse, GenerateError> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return Err(GenerateError::Parse("no JSON object in reply".to_string()));
    };
    if end < start {
        return Err(GenerateError::Parse("no JSON object in reply".to_string()));
    }

    serde_json::from_str(&text[start..=end]).map_err(|e| GenerateError::Parse(e.to_string()))
}

// ============================================
// Wire types
// ============================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> ClaudeClient {
        ClaudeClient::new(ClaudeConfig {
            api_key: "test-key".to_string(),
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            category: Category::Ebook,
            target: "新米パパ".to_string(),
            additional_notes: None,
        }
    }

    #[test]
    fn test_parse_listing_ignores_surrounding_prose() {
        let text = "こちらが提案です:\n```json\n{\"productNames\":[\"A\",\"B\",\"C\"],\"description\":\"d\",\"suggestedPrice\":980,\"tags\":[\"t\"]}\n```\n以上です。";
        let listing = parse_listing(text).unwrap();
        assert_eq!(listing.product_names, vec!["A", "B", "C"]);
        assert_eq!(listing.suggested_price, 980);
    }

    #[test]
    fn test_parse_listing_without_object_fails() {
        assert!(matches!(parse_listing("sorry"), Err(GenerateError::Parse(_))));
        assert!(matches!(parse_listing("} oops {"), Err(GenerateError::Parse(_))));
    }

    #[test]
    fn test_parse_listing_accepts_price_variants() {
        for price in ["1480", "1480.0", "\"1480\"", "\" 1480 \""] {
            let text = format!(
                r#"{{"productNames":["A","B","C"],"description":"d","suggestedPrice":{},"tags":[]}}"#,
                price
            );
            let listing = parse_listing(&text).unwrap();
            assert_eq!(listing.suggested_price, 1480, "price {}", price);
        }
    }

    #[test]
    fn test_parse_listing_rejects_fractional_price() {
        for price in ["1480.5", "\"abc\"", "-100"] {
            let text = format!(
                r#"{{"productNames":["A"],"description":"d","suggestedPrice":{},"tags":[]}}"#,
                price
            );
            assert!(matches!(parse_listing(&text), Err(GenerateError::Parse(_))), "price {}", price);
        }
    }

    #[test]
    fn test_parse_listing_missing_field_fails() {
        let text = r#"{"productNames":["A"],"description":"d","tags":[]}"#;
        assert!(matches!(parse_listing(text), Err(GenerateError::Parse(_))));
    }

    #[tokio::test]
    async fn test_write_listing_sends_headers_and_parses_reply() {
        let router = Router::new().route(
            "/v1/messages",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["x-api-key"], "test-key");
                assert_eq!(headers["anthropic-version"], ANTHROPIC_VERSION);
                assert_eq!(body["max_tokens"], 1024);
                assert_eq!(body["messages"][0]["role"], "user");
                Json(serde_json::json!({
                    "content": [{
                        "type": "text",
                        "text": "{\"productNames\":[\"育児の教科書\",\"パパ入門\",\"はじめての育児\"],\"description\":\"説明\",\"suggestedPrice\":1280,\"tags\":[\"育児\"]}"
                    }]
                }))
            }),
        );
        let client = client_for(spawn_stub(router).await);

        let listing = client.write_listing(&request()).await.unwrap();
        assert_eq!(listing.product_names[0], "育児の教科書");
        assert_eq!(listing.suggested_price, 1280);
    }

    #[tokio::test]
    async fn test_write_listing_reports_upstream_status() {
        let router = Router::new().route(
            "/v1/messages",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid x-api-key") }),
        );
        let client = client_for(spawn_stub(router).await);

        match client.write_listing(&request()).await {
            Err(GenerateError::ApiError { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("expected ApiError, got {:?}", other.map(|_| ())),
        }
    }
}
