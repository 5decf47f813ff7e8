//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::generate::{ClaudeClient, GeminiClient, GenerateError, ProductGenerator};
use crate::sales::{GumroadClient, GumroadError, SettingsStore};

/// Shared application state for all handlers
pub struct AppState {
    /// Listing and content generation, with template fallbacks
    pub generator: ProductGenerator,
    /// Gumroad sales client
    pub gumroad: GumroadClient,
    /// User-saved token and goal
    pub settings: SettingsStore,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(generator: ProductGenerator, gumroad: GumroadClient, settings: SettingsStore) -> Self {
        Self {
            generator,
            gumroad,
            settings,
            start_time: Instant::now(),
        }
    }

    /// Build state from configuration, wiring providers that have keys
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let mut generator = ProductGenerator::offline();

        if config.anthropic.is_configured() {
            let claude = ClaudeClient::new(config.anthropic.client_config())?;
            generator = generator.with_listing_writer(Arc::new(claude));
            tracing::info!(model = %config.anthropic.model, "listing generation via Claude");
        } else {
            tracing::warn!("ANTHROPIC_API_KEY not set, listings use the built-in template");
        }

        if config.gemini.is_configured() {
            let gemini = GeminiClient::new(config.gemini.client_config())?;
            generator = generator.with_content_writer(Arc::new(gemini));
            tracing::info!(model = %config.gemini.model, "content generation via Gemini");
        } else {
            tracing::warn!("GEMINI_API_KEY not set, content uses the built-in template");
        }

        let gumroad = GumroadClient::new(config.gumroad.client_config())?;
        let settings = SettingsStore::new(
            config.gumroad.access_token.clone(),
            config.gumroad.monthly_goal,
        );

        Ok(Self::new(generator, gumroad, settings))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Errors building the shared state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build provider client: {0}")]
    Provider(#[from] GenerateError),

    #[error("failed to build Gumroad client: {0}")]
    Gumroad(#[from] GumroadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_without_keys_is_offline() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert!(!state.generator.has_listing_writer());
        assert!(!state.generator.has_content_writer());
    }

    #[test]
    fn test_from_config_wires_configured_providers() {
        let mut config = Config::default();
        config.anthropic.api_key = "sk".to_string();
        let state = AppState::from_config(&config).unwrap();
        assert!(state.generator.has_listing_writer());
        assert!(!state.generator.has_content_writer());
    }
}
