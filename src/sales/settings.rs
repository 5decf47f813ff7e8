//! User-supplied sales settings, held in process memory.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Goal used until the user saves one
pub const DEFAULT_MONTHLY_GOAL: i64 = 100_000;

/// Settings as posted by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSettings {
    pub gumroad_token: String,
    pub monthly_goal: i64,
}

/// Settings as reported back, with the token masked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub gumroad_token: String,
    pub monthly_goal: i64,
}

/// Shared settings with a configured fallback token
pub struct SettingsStore {
    current: RwLock<SalesSettings>,
    default_token: String,
}

impl SettingsStore {
    /// Create a store whose token falls back to `default_token` until one is saved
    pub fn new(default_token: impl Into<String>, monthly_goal: i64) -> Self {
        Self {
            current: RwLock::new(SalesSettings {
                gumroad_token: String::new(),
                monthly_goal,
            }),
            default_token: default_token.into(),
        }
    }

    /// Replace the stored settings
    pub async fn save(&self, settings: SalesSettings) {
        let has_token = !settings.gumroad_token.is_empty();
        *self.current.write().await = settings;
        tracing::info!(has_token, "sales settings updated");
    }

    /// Token to use for Gumroad calls, if any
    pub async fn effective_token(&self) -> Option<String> {
        let current = self.current.read().await;
        let token = if current.gumroad_token.is_empty() {
            &self.default_token
        } else {
            &current.gumroad_token
        };
        (!token.is_empty()).then(|| token.clone())
    }

    pub async fn monthly_goal(&self) -> i64 {
        self.current.read().await.monthly_goal
    }

    /// Masked view for display
    pub async fn view(&self) -> SettingsView {
        let current = self.current.read().await;
        SettingsView {
            gumroad_token: if current.gumroad_token.is_empty() {
                String::new()
            } else {
                "***".to_string()
            },
            monthly_goal: current.monthly_goal,
        }
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new("", DEFAULT_MONTHLY_GOAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_saved_token_wins_over_default() {
        let store = SettingsStore::new("env-token", DEFAULT_MONTHLY_GOAL);
        assert_eq!(store.effective_token().await.as_deref(), Some("env-token"));

        store
            .save(SalesSettings {
                gumroad_token: "user-token".to_string(),
                monthly_goal: 50_000,
            })
            .await;
        assert_eq!(store.effective_token().await.as_deref(), Some("user-token"));
        assert_eq!(store.monthly_goal().await, 50_000);
    }

    #[tokio::test]
    async fn test_no_token_anywhere() {
        let store = SettingsStore::default();
        assert_eq!(store.effective_token().await, None);
        assert_eq!(store.monthly_goal().await, DEFAULT_MONTHLY_GOAL);
    }

    #[tokio::test]
    async fn test_view_masks_token() {
        let store = SettingsStore::default();
        assert_eq!(store.view().await.gumroad_token, "");

        store
            .save(SalesSettings {
                gumroad_token: "secret".to_string(),
                monthly_goal: 1,
            })
            .await;
        let view = store.view().await;
        assert_eq!(view.gumroad_token, "***");
        assert_eq!(view.monthly_goal, 1);
    }
}
