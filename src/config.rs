//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::generate::{ClaudeConfig, GeminiConfig};
use crate::sales::{GumroadConfig, DEFAULT_MONTHLY_GOAL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub anthropic: AnthropicConfig,

    #[serde(default)]
    pub gemini: GeminiSection,

    #[serde(default)]
    pub gumroad: GumroadSection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin of the web UI, allowed by CORS
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8291
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            frontend_url: default_frontend_url(),
        }
    }
}

/// Anthropic (listing generation) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    /// Empty disables the provider and the template listing is used
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_anthropic_url")]
    pub base_url: String,

    #[serde(default = "default_anthropic_model")]
    pub model: String,

    #[serde(default = "default_anthropic_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_ai_timeout")]
    pub request_timeout_secs: u64,
}

fn default_anthropic_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-haiku-4-5".to_string()
}

fn default_anthropic_max_tokens() -> u32 {
    1024
}

fn default_ai_timeout() -> u64 {
    60
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_anthropic_url(),
            model: default_anthropic_model(),
            max_tokens: default_anthropic_max_tokens(),
            request_timeout_secs: default_ai_timeout(),
        }
    }
}

impl AnthropicConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn client_config(&self) -> ClaudeConfig {
        ClaudeConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Gemini (content generation) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSection {
    /// Empty disables the provider and the template content is used
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_temperature")]
    pub temperature: f32,

    #[serde(default = "default_gemini_max_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_ai_timeout")]
    pub request_timeout_secs: u64,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_temperature() -> f32 {
    0.8
}

fn default_gemini_max_tokens() -> u32 {
    8192
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_url(),
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
            max_output_tokens: default_gemini_max_tokens(),
            request_timeout_secs: default_ai_timeout(),
        }
    }
}

impl GeminiSection {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn client_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Gumroad sales configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GumroadSection {
    /// Used when the user has not saved a token of their own
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_gumroad_url")]
    pub base_url: String,

    #[serde(default = "default_monthly_goal")]
    pub monthly_goal: i64,

    #[serde(default = "default_gumroad_timeout")]
    pub request_timeout_secs: u64,
}

fn default_gumroad_url() -> String {
    "https://api.gumroad.com".to_string()
}

fn default_monthly_goal() -> i64 {
    DEFAULT_MONTHLY_GOAL
}

fn default_gumroad_timeout() -> u64 {
    30
}

impl Default for GumroadSection {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: default_gumroad_url(),
            monthly_goal: default_monthly_goal(),
            request_timeout_secs: default_gumroad_timeout(),
        }
    }
}

impl GumroadSection {
    pub fn client_config(&self) -> GumroadConfig {
        GumroadConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "rakumane=info,tower_http=debug".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Search paths tried by [`Config::load_default`], in order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("rakumane").join("config.toml")),
            Some(PathBuf::from("/etc/rakumane/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment.
    ///
    /// Runs before logging is set up, so what happened is returned in the
    /// [`LoadReport`] for the caller to log.
    pub fn load_default() -> (Self, LoadReport) {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first readable file among `paths`
    pub fn load_first(paths: &[PathBuf]) -> (Self, LoadReport) {
        let mut report = LoadReport::default();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    report.path = Some(path.clone());
                    return (config, report);
                }
                Err(e) => report.failures.push((path.clone(), e)),
            }
        }

        (Self::from_env(), report)
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = lookup("RAKUMANE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("RAKUMANE_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(url) = lookup("RAKUMANE_FRONTEND_URL") {
            self.server.frontend_url = url;
        }

        // Provider credentials
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            self.anthropic.api_key = key;
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.gemini.api_key = key;
        }
        if let Some(token) = lookup("GUMROAD_ACCESS_TOKEN") {
            self.gumroad.access_token = token;
        }
        if let Some(goal) = lookup("RAKUMANE_MONTHLY_GOAL").and_then(|g| g.parse().ok()) {
            self.gumroad.monthly_goal = goal;
        }

        // Logging overrides
        if let Some(level) = lookup("RAKUMANE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("RAKUMANE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Outcome of [`Config::load_default`]
#[derive(Debug, Default)]
pub struct LoadReport {
    /// File the config came from; `None` means defaults plus environment
    pub path: Option<PathBuf>,
    /// Files that existed but could not be loaded
    pub failures: Vec<(PathBuf, ConfigError)>,
}

impl LoadReport {
    pub fn log(&self) {
        for (path, e) in &self.failures {
            tracing::warn!("Failed to load config from {:?}: {}", path, e);
        }
        match &self.path {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Rakumane Configuration
#
# Environment variables override these settings:
# - RAKUMANE_HOST
# - RAKUMANE_PORT
# - RAKUMANE_FRONTEND_URL
# - ANTHROPIC_API_KEY
# - GEMINI_API_KEY
# - GUMROAD_ACCESS_TOKEN
# - RAKUMANE_MONTHLY_GOAL
# - RAKUMANE_LOG_LEVEL
# - RAKUMANE_LOG_FORMAT

[server]
# Bind address
host = "0.0.0.0"
port = 8291

# Web UI origin allowed by CORS (http://localhost:3847 is always allowed)
frontend_url = "http://localhost:5173"

[anthropic]
# Leave empty to use the built-in listing template
api_key = ""
base_url = "https://api.anthropic.com"
model = "claude-haiku-4-5"
max_tokens = 1024
request_timeout_secs = 60

[gemini]
# Leave empty to use the built-in content template
api_key = ""
base_url = "https://generativelanguage.googleapis.com"
model = "gemini-2.5-flash"
temperature = 0.8
max_output_tokens = 8192
request_timeout_secs = 60

[gumroad]
# Default access token; a token saved from the dashboard takes precedence
access_token = ""
base_url = "https://api.gumroad.com"

# Monthly revenue goal (JPY)
monthly_goal = 100000
request_timeout_secs = 30

[logging]
# tracing EnvFilter directive (RUST_LOG takes precedence)
level = "rakumane=info,tower_http=debug"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_load_first_reports_skipped_and_chosen_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[server\nport = ").unwrap();
        std::fs::write(&good, "[gumroad]\nmonthly_goal = 77000\n").unwrap();

        let (_, report) = Config::load_first(&[missing.clone(), broken.clone(), good.clone()]);
        assert_eq!(report.path.as_deref(), Some(good.as_path()));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, broken);
        assert!(matches!(report.failures[0].1, ConfigError::Parse { .. }));

        let (_, report) = Config::load_first(&[missing]);
        assert!(report.path.is_none());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8291);
        assert_eq!(config.gumroad.monthly_goal, 100_000);
        assert!(!config.anthropic.is_configured());
        assert!(!config.gemini.is_configured());
        assert!(!config.logging.is_json());
        assert_eq!(config.bind_addr(), "0.0.0.0:8291");
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.server.frontend_url, defaults.server.frontend_url);
        assert_eq!(config.anthropic.model, defaults.anthropic.model);
        assert_eq!(config.gemini.max_output_tokens, defaults.gemini.max_output_tokens);
        assert_eq!(config.gumroad.monthly_goal, defaults.gumroad.monthly_goal);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\n\n[anthropic]\napi_key = \"sk-test\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.anthropic.is_configured());
        assert_eq!(config.anthropic.client_config().request_timeout_ms, 60_000);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[server\nport = ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("RAKUMANE_PORT", "8300"),
            ("RAKUMANE_FRONTEND_URL", "https://rakumane.example"),
            ("GEMINI_API_KEY", "g-key"),
            ("GUMROAD_ACCESS_TOKEN", "gum"),
            ("RAKUMANE_MONTHLY_GOAL", "250000"),
            ("RAKUMANE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 8300);
        assert_eq!(config.server.frontend_url, "https://rakumane.example");
        assert!(config.gemini.is_configured());
        assert!(!config.anthropic.is_configured());
        assert_eq!(config.gumroad.access_token, "gum");
        assert_eq!(config.gumroad.monthly_goal, 250_000);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_unparseable_numeric_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "RAKUMANE_PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 8291);
    }
}
