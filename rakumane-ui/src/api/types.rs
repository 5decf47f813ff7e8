//! Wire types shared with the Rakumane API

use serde::{Deserialize, Serialize};

/// Kind of digital product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Prompt,
    Notion,
    Canva,
    Ebook,
    Excel,
    Spreadsheet,
    Powerpoint,
    Figma,
    Checklist,
    Linestamp,
    Icon,
    Course,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Prompt,
        Category::Notion,
        Category::Canva,
        Category::Ebook,
        Category::Excel,
        Category::Spreadsheet,
        Category::Powerpoint,
        Category::Figma,
        Category::Checklist,
        Category::Linestamp,
        Category::Icon,
        Category::Course,
    ];

    /// Wire value, also used as the `<option>` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Prompt => "prompt",
            Category::Notion => "notion",
            Category::Canva => "canva",
            Category::Ebook => "ebook",
            Category::Excel => "excel",
            Category::Spreadsheet => "spreadsheet",
            Category::Powerpoint => "powerpoint",
            Category::Figma => "figma",
            Category::Checklist => "checklist",
            Category::Linestamp => "linestamp",
            Category::Icon => "icon",
            Category::Course => "course",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Prompt => "AIプロンプト集",
            Category::Notion => "Notionテンプレート",
            Category::Canva => "Canvaテンプレート",
            Category::Ebook => "電子書籍",
            Category::Excel => "Excelテンプレート",
            Category::Spreadsheet => "スプレッドシート",
            Category::Powerpoint => "PowerPointテンプレート",
            Category::Figma => "Figmaテンプレート",
            Category::Checklist => "チェックリスト/ワークシート",
            Category::Linestamp => "LINEスタンプ",
            Category::Icon => "アイコンセット",
            Category::Course => "オンラインコース",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub category: Category,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub product_names: Vec<String>,
    pub description: String,
    pub suggested_price: u32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub category: Category,
    pub product_name: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    pub content: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_name: String,
    pub count: u64,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailySales {
    pub date: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_sales: u64,
    pub total_revenue: i64,
    pub monthly_goal: i64,
    pub sales_by_product: Vec<ProductSales>,
    pub daily_sales: Vec<DailySales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSettings {
    pub gumroad_token: String,
    pub monthly_goal: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_values_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_value(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_value("podcast"), None);
    }

    #[test]
    fn test_request_wire_format() {
        let req = GenerateRequest {
            category: Category::Linestamp,
            target: "猫好き".into(),
            additional_notes: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "category": "linestamp", "target": "猫好き" })
        );
    }
}
