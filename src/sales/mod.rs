//! Sales Dashboard
//!
//! Month-to-date revenue pulled from Gumroad, aggregated into the
//! summary the dashboard renders.
//!
//! ## Data Flow
//!
//! 1. The user stores a Gumroad token and monthly goal ([`SettingsStore`])
//! 2. [`GumroadClient`] fetches sales since the first of the month
//! 3. [`summarize`] folds them into totals, a per-product ranking and a
//!    daily series
//! 4. Without a token, [`placeholder_summary`] supplies zero-valued days

mod gumroad;
mod settings;
mod summary;

pub use gumroad::{GumroadClient, GumroadConfig, GumroadError, GumroadSale};
pub use settings::{SalesSettings, SettingsStore, SettingsView, DEFAULT_MONTHLY_GOAL};
pub use summary::{placeholder_summary, summarize, PLACEHOLDER_DAYS};

use serde::{Deserialize, Serialize};

/// Revenue for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_name: String,
    pub count: u64,
    pub revenue: i64,
}

/// Revenue for one calendar day (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: String,
    pub revenue: i64,
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_sales: u64,
    pub total_revenue: i64,
    pub monthly_goal: i64,
    /// Highest revenue first
    pub sales_by_product: Vec<ProductSales>,
    /// Oldest day first
    pub daily_sales: Vec<DailySales>,
}

impl DashboardSummary {
    /// Share of the monthly goal reached, in percent, capped at 100.
    ///
    /// A non-positive goal yields 0.
    pub fn achievement_rate(&self) -> f64 {
        if self.monthly_goal <= 0 {
            return 0.0;
        }
        (self.total_revenue as f64 / self.monthly_goal as f64 * 100.0).min(100.0)
    }

    /// The first `n` products in ranking order
    pub fn top_products(&self, n: usize) -> &[ProductSales] {
        let end = n.min(self.sales_by_product.len());
        &self.sales_by_product[..end]
    }
}

/// `¥` followed by the amount with thousands separators
pub fn format_yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-¥{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}
