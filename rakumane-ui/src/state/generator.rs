//! Generator Page State
//!
//! Form fields, the latest listing and the chosen product name. Kept free
//! of signals so the rules can be tested natively.

use crate::api::types::{
    Category, GenerateContentRequest, GenerateContentResponse, GenerateRequest, GenerateResponse,
};

/// Marketplace page opened by the publish action
pub const GUMROAD_NEW_PRODUCT_URL: &str = "https://app.gumroad.com/products/new";

pub const MSG_TARGET_REQUIRED: &str = "ターゲット層を入力してください";
pub const MSG_NAME_REQUIRED: &str = "商品名を選択してください";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorState {
    pub category: Category,
    pub target: String,
    pub notes: String,
    pub listing: Option<GenerateResponse>,
    /// Defaults to the first candidate when a listing arrives
    pub selected_name: String,
    pub content: Option<GenerateContentResponse>,
}

impl GeneratorState {
    fn notes(&self) -> Option<String> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }

    /// Build the listing request, or the message to show instead of calling
    pub fn listing_request(&self) -> Result<GenerateRequest, &'static str> {
        if self.target.trim().is_empty() {
            return Err(MSG_TARGET_REQUIRED);
        }

        Ok(GenerateRequest {
            category: self.category,
            target: self.target.clone(),
            additional_notes: self.notes(),
        })
    }

    /// Store a fresh listing and reset the selection and content
    pub fn accept_listing(&mut self, listing: GenerateResponse) {
        self.selected_name = listing.product_names.first().cloned().unwrap_or_default();
        self.listing = Some(listing);
        self.content = None;
    }

    /// Build the content request for the selected name
    pub fn content_request(&self) -> Result<GenerateContentRequest, &'static str> {
        if self.listing.is_none() || self.selected_name.is_empty() {
            return Err(MSG_NAME_REQUIRED);
        }

        Ok(GenerateContentRequest {
            category: self.category,
            product_name: self.selected_name.clone(),
            target: self.target.clone(),
            additional_notes: self.notes(),
        })
    }

    /// Clipboard text for the marketplace form
    pub fn publish_summary(&self) -> Option<String> {
        let listing = self.listing.as_ref()?;
        Some(format!(
            "商品名: {}\n\n説明文:\n{}\n\n価格: {}円\n\nタグ: {}",
            self.selected_name,
            listing.description,
            listing.suggested_price,
            tags_text(listing)
        ))
    }
}

pub fn names_text(listing: &GenerateResponse) -> String {
    listing.product_names.join("\n")
}

pub fn tags_text(listing: &GenerateResponse) -> String {
    listing.tags.join(", ")
}
