//! Rakumane API Server
//!
//! Run with: cargo run --bin rakumane
//!
//! # Configuration
//!
//! Read from `--config PATH`, or the first of
//! `~/.config/rakumane/config.toml`, `/etc/rakumane/config.toml` and
//! `./config.toml`. Environment variables override file values:
//! - `RAKUMANE_HOST`, `RAKUMANE_PORT`: Bind address (default: 0.0.0.0:8291)
//! - `RAKUMANE_FRONTEND_URL`: Web UI origin allowed by CORS
//! - `ANTHROPIC_API_KEY`: Enables listing generation via Claude
//! - `GEMINI_API_KEY`: Enables content generation via Gemini
//! - `GUMROAD_ACCESS_TOKEN`: Default token for the sales dashboard
//! - `RAKUMANE_MONTHLY_GOAL`: Initial monthly revenue goal
//! - `RAKUMANE_LOG_LEVEL`, `RAKUMANE_LOG_FORMAT`: Logging (`RUST_LOG` wins)

use clap::Parser;
use rakumane::api::{serve, AppState};
use rakumane::config::{Config, LoadReport, LoggingConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "rakumane")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Digital-product listing generator and Gumroad sales dashboard backend")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, report) = match &args.config {
        Some(path) => (
            Config::load_with_env(path)?,
            LoadReport {
                path: Some(path.clone()),
                ..Default::default()
            },
        ),
        None => Config::load_default(),
    };

    init_tracing(&config.logging);
    report.log();

    tracing::info!("Starting Rakumane API server v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(&config)?;
    serve(state, &config).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
