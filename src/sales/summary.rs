//! Aggregation of raw sales into a [`DashboardSummary`].

use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

use super::{DailySales, DashboardSummary, GumroadSale, ProductSales};

/// Days of zero revenue shown when no Gumroad token is configured
pub const PLACEHOLDER_DAYS: i64 = 14;

/// Fold sales into totals, a revenue ranking and a daily series.
///
/// Products are ordered by revenue, highest first; ties keep the order in
/// which the products first appeared. Days are ordered oldest first.
pub fn summarize(sales: &[GumroadSale], monthly_goal: i64) -> DashboardSummary {
    let mut total_revenue = 0;
    let mut by_product: Vec<ProductSales> = Vec::new();
    let mut product_index: HashMap<&str, usize> = HashMap::new();
    let mut by_day: BTreeMap<&str, i64> = BTreeMap::new();

    for sale in sales {
        let amount = sale.amount();
        total_revenue += amount;

        let name = sale.product_name();
        let idx = *product_index.entry(name).or_insert_with(|| {
            by_product.push(ProductSales {
                product_name: name.to_string(),
                count: 0,
                revenue: 0,
            });
            by_product.len() - 1
        });
        by_product[idx].count += 1;
        by_product[idx].revenue += amount;

        *by_day.entry(sale.day()).or_insert(0) += amount;
    }

    by_product.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    DashboardSummary {
        total_sales: sales.len() as u64,
        total_revenue,
        monthly_goal,
        sales_by_product: by_product,
        daily_sales: by_day
            .into_iter()
            .map(|(date, revenue)| DailySales {
                date: date.to_string(),
                revenue,
            })
            .collect(),
    }
}

/// Zero-valued summary covering the [`PLACEHOLDER_DAYS`] days up to `today`
pub fn placeholder_summary(today: NaiveDate, monthly_goal: i64) -> DashboardSummary {
    let daily_sales = (0..PLACEHOLDER_DAYS)
        .rev()
        .map(|days_ago| DailySales {
            date: (today - Duration::days(days_ago)).format("%Y-%m-%d").to_string(),
            revenue: 0,
        })
        .collect();

    DashboardSummary {
        total_sales: 0,
        total_revenue: 0,
        monthly_goal,
        sales_by_product: Vec::new(),
        daily_sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sale(product: &str, price: serde_json::Value, created_at: &str) -> GumroadSale {
        serde_json::from_value(json!({
            "product_name": product,
            "price": price,
            "created_at": created_at,
        }))
        .unwrap()
    }

    #[test]
    fn test_totals_and_ranking() {
        let sales = vec![
            sale("Notion家計簿", json!(5), "2026-10-01T09:00:00Z"),
            sale("プロンプト集", json!(20), "2026-10-01T12:00:00Z"),
            sale("Notion家計簿", json!(5), "2026-10-03T08:30:00Z"),
            sale("チェックリスト", json!(10), "2026-10-02T10:00:00Z"),
        ];

        let summary = summarize(&sales, 100_000);
        assert_eq!(summary.total_sales, 4);
        assert_eq!(summary.total_revenue, 4000);

        let ranking: Vec<_> = summary
            .sales_by_product
            .iter()
            .map(|p| (p.product_name.as_str(), p.count, p.revenue))
            .collect();
        assert_eq!(
            ranking,
            vec![
                ("プロンプト集", 1, 2000),
                ("Notion家計簿", 2, 1000),
                ("チェックリスト", 1, 1000),
            ]
        );
    }

    #[test]
    fn test_daily_series_is_sorted_by_date() {
        let sales = vec![
            sale("A", json!(1), "2026-10-05T00:00:00Z"),
            sale("A", json!(2), "2026-10-02T00:00:00Z"),
            sale("B", json!(3), "2026-10-05T23:59:59Z"),
        ];

        let summary = summarize(&sales, 1);
        assert_eq!(
            summary.daily_sales,
            vec![
                DailySales { date: "2026-10-02".into(), revenue: 200 },
                DailySales { date: "2026-10-05".into(), revenue: 400 },
            ]
        );
    }

    #[test]
    fn test_empty_sales() {
        let summary = summarize(&[], 30_000);
        assert_eq!(summary.total_sales, 0);
        assert_eq!(summary.total_revenue, 0);
        assert_eq!(summary.monthly_goal, 30_000);
        assert!(summary.sales_by_product.is_empty());
        assert!(summary.daily_sales.is_empty());
    }

    #[test]
    fn test_placeholder_covers_two_weeks_ending_today() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let summary = placeholder_summary(today, 80_000);

        assert_eq!(summary.daily_sales.len(), 14);
        assert_eq!(summary.daily_sales.first().unwrap().date, "2026-10-04");
        assert_eq!(summary.daily_sales.last().unwrap().date, "2026-10-17");
        assert!(summary.daily_sales.iter().all(|d| d.revenue == 0));
        assert_eq!(summary.monthly_goal, 80_000);
        assert_eq!(summary.achievement_rate(), 0.0);
    }
}
