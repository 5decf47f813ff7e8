//! Product Catalog
//!
//! The fixed set of digital product kinds the generator understands,
//! with their display labels and suggested price bands (JPY).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of digital product being listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

/// Inclusive price band for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Integer midpoint of the band
    pub fn midpoint(&self) -> u32 {
        (self.min + self.max) / 2
    }
}

impl Category {
    /// All categories in display order
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

    /// Wire value used in JSON
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

    /// Human-readable label shown to buyers and in prompts
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

    /// Suggested price band
    pub fn price_range(&self) -> PriceRange {
        match self {
            Category::Prompt => PriceRange::new(980, 2980),
            Category::Notion => PriceRange::new(500, 1500),
            Category::Canva => PriceRange::new(800, 2000),
            Category::Ebook => PriceRange::new(500, 1980),
            Category::Excel => PriceRange::new(500, 1500),
            Category::Spreadsheet => PriceRange::new(500, 1500),
            Category::Powerpoint => PriceRange::new(800, 2000),
            Category::Figma => PriceRange::new(1500, 5000),
            Category::Checklist => PriceRange::new(300, 980),
            Category::Linestamp => PriceRange::new(120, 480),
            Category::Icon => PriceRange::new(500, 2000),
            Category::Course => PriceRange::new(3000, 30000),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        let parsed: Category = serde_json::from_str("\"linestamp\"").unwrap();
        assert_eq!(parsed, Category::Linestamp);
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(serde_json::from_str::<Category>("\"video\"").is_err());
        assert_eq!(
            "video".parse::<Category>(),
            Err(UnknownCategory("video".to_string()))
        );
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Figma".parse::<Category>(), Ok(Category::Figma));
        assert_eq!(" course ".parse::<Category>(), Ok(Category::Course));
    }

    #[test]
    fn test_price_midpoints() {
        assert_eq!(Category::Prompt.price_range().midpoint(), 1980);
        assert_eq!(Category::Ebook.price_range().midpoint(), 1240);
        assert_eq!(Category::Linestamp.price_range().midpoint(), 300);
        assert_eq!(Category::Course.price_range().midpoint(), 16500);
    }

    #[test]
    fn test_every_range_is_ordered() {
        for category in Category::ALL {
            let range = category.price_range();
            assert!(range.min < range.max, "{} has an inverted range", category);
        }
    }
}
