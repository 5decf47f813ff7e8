//! Dashboard Page State
//!
//! Derived figures for the dashboard and the settings dialog's
//! save cycle.

use crate::api::types::{DashboardSummary, ProductSales, SalesSettings};

/// Refetch interval for the summary
pub const REFRESH_INTERVAL_MS: u32 = 5 * 60 * 1000;

/// Products listed in the ranking
pub const RANKING_SIZE: usize = 5;

/// Goal prefilled in the settings dialog
pub const DEFAULT_GOAL: i64 = 100_000;

/// Percent of the goal reached, capped at 100; 0 without data or goal
pub fn achievement_rate(summary: Option<&DashboardSummary>) -> f64 {
    match summary {
        Some(s) if s.monthly_goal > 0 => {
            (s.total_revenue as f64 / s.monthly_goal as f64 * 100.0).min(100.0)
        }
        _ => 0.0,
    }
}

/// First entries of the server-ordered ranking
pub fn top_products(summary: Option<&DashboardSummary>) -> Vec<ProductSales> {
    summary
        .map(|s| s.sales_by_product.iter().take(RANKING_SIZE).cloned().collect())
        .unwrap_or_default()
}

/// `¥` plus the amount with thousands separators
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}¥{}", sign, out)
}

/// Banner shown while the summary cannot be loaded
pub const MSG_FETCH_FAILED: &str =
    "売上データを取得できませんでした。設定からGumroadトークンを入力してください。";

/// Figures rendered by the dashboard cards
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Last fetch failed; show [`MSG_FETCH_FAILED`]
    pub failed: bool,
    pub revenue: String,
    pub sales: String,
    pub goal: String,
    pub rate: f64,
}

impl DashboardView {
    /// Build the card figures from the latest fetch. Without data the
    /// numbers read zero and the goal falls back to `form_goal`.
    pub fn from_result(result: Option<&Result<DashboardSummary, String>>, form_goal: &str) -> Self {
        let summary = result.and_then(|r| r.as_ref().ok());
        let goal = summary
            .map(|s| s.monthly_goal)
            .filter(|g| *g > 0)
            .or_else(|| form_goal.trim().parse().ok())
            .unwrap_or(DEFAULT_GOAL);

        Self {
            failed: matches!(result, Some(Err(_))),
            revenue: format_currency(summary.map(|s| s.total_revenue).unwrap_or(0)),
            sales: format!("{}件", summary.map(|s| s.total_sales).unwrap_or(0)),
            goal: format_currency(goal),
            rate: achievement_rate(summary),
        }
    }

    pub fn rate_text(&self) -> String {
        format!("{:.1}%", self.rate)
    }
}

/// Settings dialog form and its save cycle
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub open: bool,
    pub token: String,
    pub goal: String,
    pub pending: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            open: false,
            token: String::new(),
            goal: DEFAULT_GOAL.to_string(),
            pending: false,
        }
    }
}

impl SettingsForm {
    /// Validate the form and mark it pending
    pub fn begin_save(&mut self) -> Result<SalesSettings, &'static str> {
        let goal = self
            .goal
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|g| *g > 0)
            .ok_or("月間目標は1以上の数値で入力してください")?;

        self.pending = true;
        Ok(SalesSettings {
            gumroad_token: self.token.trim().to_string(),
            monthly_goal: goal,
        })
    }

    /// Apply a save result; returns whether the summary must be refetched
    pub fn finish_save(&mut self, succeeded: bool) -> bool {
        self.pending = false;
        if succeeded {
            self.open = false;
        }
        succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::DailySales;

    fn summary(revenue: i64, goal: i64, products: usize) -> DashboardSummary {
        DashboardSummary {
            total_sales: products as u64,
            total_revenue: revenue,
            monthly_goal: goal,
            sales_by_product: (0..products)
                .map(|i| ProductSales {
                    product_name: format!("p{}", i),
                    count: 1,
                    revenue: 100 - i as i64,
                })
                .collect(),
            daily_sales: vec![DailySales {
                date: "2026-10-01".into(),
                revenue,
            }],
        }
    }

    #[test]
    fn test_achievement_rate() {
        assert_eq!(achievement_rate(None), 0.0);
        assert_eq!(achievement_rate(Some(&summary(50_000, 100_000, 0))), 50.0);
        assert_eq!(achievement_rate(Some(&summary(300_000, 100_000, 0))), 100.0);
        assert_eq!(achievement_rate(Some(&summary(10, 0, 0))), 0.0);
    }

    #[test]
    fn test_top_products_limits_to_five() {
        assert!(top_products(None).is_empty());
        let top = top_products(Some(&summary(0, 1, 8)));
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].product_name, "p0");
        assert_eq!(top[4].product_name, "p4");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "¥0");
        assert_eq!(format_currency(999), "¥999");
        assert_eq!(format_currency(100_000), "¥100,000");
        assert_eq!(format_currency(-1_500), "-¥1,500");
    }

    #[test]
    fn test_failed_fetch_shows_banner_and_zeros() {
        let result: Result<DashboardSummary, String> = Err("Network error".into());
        let view = DashboardView::from_result(Some(&result), "250000");
        assert!(view.failed);
        assert_eq!(view.revenue, "¥0");
        assert_eq!(view.sales, "0件");
        assert_eq!(view.goal, "¥250,000");
        assert_eq!(view.rate, 0.0);
        assert_eq!(view.rate_text(), "0.0%");
    }

    #[test]
    fn test_pending_fetch_has_no_banner() {
        let view = DashboardView::from_result(None, "not a number");
        assert!(!view.failed);
        assert_eq!(view.revenue, "¥0");
        assert_eq!(view.sales, "0件");
        assert_eq!(view.goal, "¥100,000");
    }

    #[test]
    fn test_loaded_summary_fills_cards() {
        let result = Ok(summary(25_000, 50_000, 3));
        let view = DashboardView::from_result(Some(&result), "100000");
        assert!(!view.failed);
        assert_eq!(view.revenue, "¥25,000");
        assert_eq!(view.sales, "3件");
        assert_eq!(view.goal, "¥50,000");
        assert_eq!(view.rate_text(), "50.0%");
    }

    #[test]
    fn test_settings_form_defaults() {
        let form = SettingsForm::default();
        assert_eq!(form.goal, "100000");
        assert!(!form.open);
    }

    #[test]
    fn test_successful_save_closes_and_invalidates_once() {
        let mut form = SettingsForm {
            open: true,
            token: " tok ".into(),
            ..Default::default()
        };
        let settings = form.begin_save().unwrap();
        assert_eq!(settings.gumroad_token, "tok");
        assert_eq!(settings.monthly_goal, 100_000);
        assert!(form.pending);

        assert!(form.finish_save(true));
        assert!(!form.open);
        assert!(!form.pending);
    }

    #[test]
    fn test_failed_save_only_clears_pending() {
        let mut form = SettingsForm {
            open: true,
            ..Default::default()
        };
        form.begin_save().unwrap();

        assert!(!form.finish_save(false));
        assert!(form.open);
        assert!(!form.pending);
    }

    #[test]
    fn test_invalid_goal_is_rejected_before_saving() {
        let mut form = SettingsForm {
            open: true,
            goal: "abc".into(),
            ..Default::default()
        };
        assert!(form.begin_save().is_err());
        assert!(!form.pending);

        form.goal = "0".into();
        assert!(form.begin_save().is_err());
    }
}
