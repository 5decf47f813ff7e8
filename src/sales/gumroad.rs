//! Gumroad sales API client

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

/// Configuration for the Gumroad client
#[derive(Debug, Clone)]
pub struct GumroadConfig {
    /// Base URL (e.g., "https://api.gumroad.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for GumroadConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.gumroad.com".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// One sale as reported by `GET /v2/sales`
#[derive(Debug, Clone, Deserialize)]
pub struct GumroadSale {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    price: f64,
    #[serde(default)]
    created_at: String,
}

impl GumroadSale {
    pub fn product_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or("Unknown")
    }

    /// Sale amount: the reported price times 100, truncated
    pub fn amount(&self) -> i64 {
        (self.price * 100.0) as i64
    }

    /// Calendar day of the sale, the first ten characters of `created_at`
    pub fn day(&self) -> &str {
        match self.created_at.char_indices().nth(10) {
            Some((idx, _)) => &self.created_at[..idx],
            None => &self.created_at,
        }
    }
}

/// Gumroad sends prices as numbers or numeric strings
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
        Null(Option<()>),
    }

    match Price::deserialize(deserializer)? {
        Price::Number(n) => Ok(n),
        Price::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Price::Null(_) => Ok(0.0),
    }
}

#[derive(Debug, Deserialize)]
struct SalesPage {
    #[serde(default)]
    sales: Vec<GumroadSale>,
}

/// Errors that can occur when talking to Gumroad
#[derive(Error, Debug)]
pub enum GumroadError {
    #[error("Gumroad unavailable")]
    Unavailable,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gumroad rejected the access token")]
    InvalidCredential,

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("request timeout")]
    Timeout,
}

/// HTTP client for the Gumroad sales endpoint
pub struct GumroadClient {
    client: Client,
    config: GumroadConfig,
}

impl GumroadClient {
    pub fn new(config: GumroadConfig) -> Result<Self, GumroadError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GumroadConfig {
        &self.config
    }

    /// Fetch every sale since the start of the current local month
    pub async fn month_to_date(&self, access_token: &str) -> Result<Vec<GumroadSale>, GumroadError> {
        self.sales_after(access_token, month_start(Local::now().date_naive()))
            .await
    }

    /// Fetch sales created after `after`
    pub async fn sales_after(
        &self,
        access_token: &str,
        after: NaiveDateTime,
    ) -> Result<Vec<GumroadSale>, GumroadError> {
        let url = format!("{}/v2/sales", self.config.base_url.trim_end_matches('/'));
        let after = after.format("%Y-%m-%dT%H:%M:%S").to_string();

        tracing::debug!(%after, "fetching Gumroad sales");

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", access_token), ("after", after.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GumroadError::Timeout
                } else if e.is_connect() {
                    GumroadError::Unavailable
                } else {
                    GumroadError::Request(e)
                }
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(GumroadError::InvalidCredential);
            }
            status => {
                let text = response.text().await.unwrap_or_default();
                return Err(GumroadError::ApiError {
                    status: status.as_u16(),
                    message: text,
                });
            }
        }

        let page: SalesPage = response.json().await?;
        tracing::debug!(count = page.sales.len(), "received Gumroad sales");
        Ok(page.sales)
    }
}

/// Local midnight on the first day of `today`'s month
fn month_start(today: NaiveDate) -> NaiveDateTime {
    today
        .with_day(1)
        .unwrap_or(today)
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
}
