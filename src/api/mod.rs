//! Rakumane REST API
//!
//! HTTP API layer for Rakumane, built with Axum.
//!
//! # Endpoints
//!
//! ## Generation
//! - `POST /api/generate` - Listing candidates for a category and target
//! - `POST /api/generate-content` - Full deliverable for a chosen name
//!
//! ## Sales
//! - `GET /api/sales` - Month-to-date dashboard summary
//! - `POST /api/settings` - Save Gumroad token and monthly goal
//! - `GET /api/settings` - Saved settings, token masked
//!
//! ## Health
//! - `GET /api/health` - Service status
//!
//! # Example
//!
//! ```rust,ignore
//! use rakumane::api::{serve, AppState};
//! use rakumane::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _) = Config::load_default();
//!     let state = AppState::from_config(&config)?;
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, StateError};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;

/// Local dev origin of the web UI, always allowed
pub const DEV_UI_ORIGIN: &str = "http://localhost:3847";

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState, frontend_url: &str) -> Router {
    let api_routes = Router::new()
        .route("/generate", post(routes::generate::generate_listing))
        .route("/generate-content", post(routes::content::generate_content))
        .route("/sales", get(routes::sales::get_sales))
        .route(
            "/settings",
            get(routes::settings::get_settings).post(routes::settings::save_settings),
        )
        .route("/health", get(routes::health::health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_url))
        .with_state(shared_state)
}

/// CORS for the configured UI origin and the local dev origin
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = [frontend_url, DEV_UI_ORIGIN]
        .iter()
        .map(|origin| origin.trim_end_matches('/'))
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &Config) -> Result<(), ApiError> {
    let router = build_router(state, &config.server.frontend_url);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Rakumane API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Rakumane API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
