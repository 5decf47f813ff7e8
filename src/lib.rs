//! # Rakumane
//!
//! Digital-product listing generator and Gumroad sales dashboard.
//!
//! ## Features
//!
//! - **Listing generation**: three names, description, price and tags for a
//!   product idea, written by Claude or a built-in template
//! - **Content generation**: the full Markdown deliverable for a chosen name,
//!   written by Gemini or a built-in template
//! - **Sales dashboard**: month-to-date Gumroad revenue with a per-product
//!   ranking, daily series and goal tracking
//!
//! ## Modules
//!
//! - [`catalog`]: Product categories and price bands
//! - [`generate`]: Listing and content generation
//! - [`sales`]: Gumroad client and dashboard aggregation
//! - [`api`]: REST API server with Axum
//! - [`client`]: Typed client for the REST API
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rakumane::catalog::Category;
//! use rakumane::generate::{GenerateRequest, ProductGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = ProductGenerator::offline();
//!
//!     let listing = generator
//!         .listing(&GenerateRequest {
//!             category: Category::Notion,
//!             target: "フリーランス".to_string(),
//!             additional_notes: None,
//!         })
//!         .await?;
//!
//!     println!("{}", listing.names_text());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod generate;
pub mod sales;

// Re-export top-level types for convenience
pub use catalog::{Category, PriceRange, UnknownCategory};

pub use generate::{
    ClaudeClient, ClaudeConfig, GeminiClient, GeminiConfig, GenerateContentRequest,
    GenerateContentResponse, GenerateError, GenerateRequest, GenerateResponse, ProductGenerator,
};

pub use sales::{
    DailySales, DashboardSummary, GumroadClient, GumroadConfig, GumroadError, ProductSales,
    SalesSettings, SettingsStore,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use client::{ClientError, RakumaneClient};

pub use config::{Config, ConfigError, LoadReport, LoggingConfig};
