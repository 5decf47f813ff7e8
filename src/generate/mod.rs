//! Listing and Content Generation
//!
//! Produces marketing copy for a digital product (names, description,
//! price, tags) and, in a second stage, the full deliverable text for one
//! chosen product name.
//!
//! ## Providers
//!
//! - **Listing**: Anthropic Messages API ([`ClaudeClient`])
//! - **Content**: Gemini `generateContent` ([`GeminiClient`])
//!
//! Either provider may be absent. [`ProductGenerator`] then answers with a
//! deterministic template built from the category and target, so the
//! application stays usable without any API key.

mod claude;
mod fallback;
mod gemini;
mod prompts;

pub use claude::{ClaudeClient, ClaudeConfig};
pub use fallback::{content_filename, fallback_content, fallback_listing};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompts::{content_prompt, listing_prompt};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::catalog::Category;

// ============================================
// Request/Response DTOs
// ============================================

/// Request for listing candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub category: Category,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl GenerateRequest {
    /// Additional notes, treating a blank string as absent
    pub fn notes(&self) -> Option<&str> {
        non_blank(self.additional_notes.as_deref())
    }
}

/// Generated listing candidates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub product_names: Vec<String>,
    pub description: String,
    #[serde(deserialize_with = "lenient_yen")]
    pub suggested_price: u32,
    pub tags: Vec<String>,
}

/// Models answer with `1480`, `1480.0` or `"1480"` for the price
fn lenient_yen<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Whole(u32),
        Number(f64),
        Text(String),
    }

    let value = match Price::deserialize(deserializer)? {
        Price::Whole(n) => return Ok(n),
        Price::Number(n) => n,
        Price::Text(s) => s.trim().parse::<f64>().map_err(D::Error::custom)?,
    };

    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(D::Error::custom(format!("price {} is not a whole yen amount", value)));
    }
    Ok(value as u32)
}

/// Marketplace page where a listing is published by hand
pub const GUMROAD_NEW_PRODUCT_URL: &str = "https://app.gumroad.com/products/new";

impl GenerateResponse {
    /// Candidate names, one per line
    pub fn names_text(&self) -> String {
        self.product_names.join("\n")
    }

    pub fn tags_text(&self) -> String {
        self.tags.join(", ")
    }

    /// Clipboard text pasted into the marketplace form
    pub fn publish_summary(&self, selected_name: &str) -> String {
        format!(
            "商品名: {}\n\n説明文:\n{}\n\n価格: {}円\n\nタグ: {}",
            selected_name,
            self.description,
            self.suggested_price,
            self.tags_text()
        )
    }
}

/// Request for the full deliverable of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub category: Category,
    pub product_name: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl GenerateContentRequest {
    /// Additional notes, treating a blank string as absent
    pub fn notes(&self) -> Option<&str> {
        non_blank(self.additional_notes.as_deref())
    }
}

/// Generated deliverable and its suggested download name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    pub content: String,
    pub filename: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

// ============================================
// Provider traits
// ============================================

/// Writes listing candidates for a product idea
#[async_trait]
pub trait ListingWriter: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    async fn write_listing(&self, req: &GenerateRequest) -> Result<GenerateResponse, GenerateError>;
}

/// Writes the full deliverable text for a chosen product
#[async_trait]
pub trait ContentWriter: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    async fn write_content(&self, req: &GenerateContentRequest) -> Result<String, GenerateError>;
}

/// Generation front door used by the API layer
#[derive(Clone, Default)]
pub struct ProductGenerator {
    listing: Option<Arc<dyn ListingWriter>>,
    content: Option<Arc<dyn ContentWriter>>,
}

impl ProductGenerator {
    /// Generator that only uses the built-in templates
    pub fn offline() -> Self {
        Self::default()
    }

    /// Attach a listing provider
    pub fn with_listing_writer(mut self, writer: Arc<dyn ListingWriter>) -> Self {
        self.listing = Some(writer);
        self
    }

    /// Attach a content provider
    pub fn with_content_writer(mut self, writer: Arc<dyn ContentWriter>) -> Self {
        self.content = Some(writer);
        self
    }

    pub fn has_listing_writer(&self) -> bool {
        self.listing.is_some()
    }

    pub fn has_content_writer(&self) -> bool {
        self.content.is_some()
    }

    /// Generate listing candidates.
    ///
    /// An unparseable model reply degrades to the template listing;
    /// transport and upstream API failures are returned to the caller.
    pub async fn listing(&self, req: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
        let Some(writer) = &self.listing else {
            tracing::debug!(category = %req.category, "no listing provider, using template");
            return Ok(fallback_listing(req));
        };

        match writer.write_listing(req).await {
            Ok(listing) => {
                tracing::info!(
                    provider = writer.name(),
                    category = %req.category,
                    names = listing.product_names.len(),
                    "listing generated"
                );
                Ok(listing)
            }
            Err(GenerateError::Parse(reason)) => {
                tracing::warn!(
                    provider = writer.name(),
                    %reason,
                    "model reply was not a listing, using template"
                );
                Ok(fallback_listing(req))
            }
            Err(e) => Err(e),
        }
    }

    /// Generate the deliverable text.
    ///
    /// Never fails: any provider error is logged and the template content
    /// is returned instead.
    pub async fn content(&self, req: &GenerateContentRequest) -> GenerateContentResponse {
        let content = match &self.content {
            Some(writer) => match writer.write_content(req).await {
                Ok(text) => {
                    tracing::info!(
                        provider = writer.name(),
                        product = %req.product_name,
                        bytes = text.len(),
                        "content generated"
                    );
                    text
                }
                Err(e) => {
                    tracing::warn!(provider = writer.name(), error = %e, "content generation failed, using template");
                    fallback_content(req)
                }
            },
            None => fallback_content(req),
        };

        GenerateContentResponse {
            content,
            filename: content_filename(&req.product_name),
        }
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to a generation provider
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("provider unavailable")]
    Unavailable,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("request timeout")]
    Timeout,

    #[error("unexpected reply: {0}")]
    Parse(String),
}

impl GenerateError {
    /// Classify a transport error
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerateError::Timeout
        } else if e.is_connect() {
            GenerateError::Unavailable
        } else {
            GenerateError::Request(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum FixedListing {
        Listing(GenerateResponse),
        Garbled,
        Overloaded,
    }

    #[async_trait]
    impl ListingWriter for FixedListing {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn write_listing(&self, _req: &GenerateRequest) -> Result<GenerateResponse, GenerateError> {
            match self {
                FixedListing::Listing(listing) => Ok(listing.clone()),
                FixedListing::Garbled => Err(GenerateError::Parse("no json".to_string())),
                FixedListing::Overloaded => Err(GenerateError::ApiError {
                    status: 529,
                    message: "overloaded".to_string(),
                }),
            }
        }
    }

    struct FailingContent;

    #[async_trait]
    impl ContentWriter for FailingContent {
        fn name(&self) -> &str {
            "failing"
        }

        async fn write_content(&self, _req: &GenerateContentRequest) -> Result<String, GenerateError> {
            Err(GenerateError::Timeout)
        }
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            category: Category::Notion,
            target: "副業で稼ぎたい会社員".to_string(),
            additional_notes: None,
        }
    }

    fn content_request() -> GenerateContentRequest {
        GenerateContentRequest {
            category: Category::Ebook,
            product_name: "朝活 完全ガイド".to_string(),
            target: "会社員".to_string(),
            additional_notes: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let json = r#"{"category":"canva","target":"先生","additionalNotes":"シンプルに"}"#;
        let req: GenerateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.category, Category::Canva);
        assert_eq!(req.notes(), Some("シンプルに"));

        let without_notes = serde_json::to_value(&request()).unwrap();
        assert!(without_notes.get("additionalNotes").is_none());
    }

    #[test]
    fn test_blank_notes_are_absent() {
        assert_eq!(content_request().notes(), None);
    }

    #[tokio::test]
    async fn test_offline_listing_uses_template() {
        let generator = ProductGenerator::offline();
        let listing = generator.listing(&request()).await.unwrap();
        assert_eq!(listing, fallback_listing(&request()));
    }

    #[tokio::test]
    async fn test_parse_failure_degrades_to_template() {
        let generator =
            ProductGenerator::offline().with_listing_writer(Arc::new(FixedListing::Garbled));
        let listing = generator.listing(&request()).await.unwrap();
        assert_eq!(listing.suggested_price, Category::Notion.price_range().midpoint());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_returned() {
        let generator =
            ProductGenerator::offline().with_listing_writer(Arc::new(FixedListing::Overloaded));
        let result = generator.listing(&request()).await;
        assert!(matches!(result, Err(GenerateError::ApiError { status: 529, .. })));
    }

    #[tokio::test]
    async fn test_provider_listing_is_passed_through() {
        let listing = GenerateResponse {
            product_names: vec!["A".into(), "B".into(), "C".into()],
            description: "desc".into(),
            suggested_price: 1200,
            tags: vec!["x".into()],
        };
        let generator = ProductGenerator::offline()
            .with_listing_writer(Arc::new(FixedListing::Listing(listing.clone())));
        assert_eq!(generator.listing(&request()).await.unwrap(), listing);
    }

    #[test]
    fn test_publish_summary_format() {
        let listing = GenerateResponse {
            product_names: vec!["A".into(), "B".into(), "C".into()],
            description: "一行目\n二行目".into(),
            suggested_price: 1480,
            tags: vec!["Notion".into(), "家計簿".into()],
        };
        assert_eq!(listing.names_text(), "A\nB\nC");
        assert_eq!(
            listing.publish_summary("B"),
            "商品名: B\n\n説明文:\n一行目\n二行目\n\n価格: 1480円\n\nタグ: Notion, 家計簿"
        );
    }

    #[tokio::test]
    async fn test_content_failure_degrades_to_template() {
        let generator = ProductGenerator::offline().with_content_writer(Arc::new(FailingContent));
        let response = generator.content(&content_request()).await;
        assert!(response.content.starts_with("# 朝活 完全ガイド"));
        assert_eq!(response.filename, "朝活_完全ガイド.md");
    }
}
