//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! Everything the browser page used to provide through ambient globals
//! (server location, CSRF token, timings) is carried here and handed to the
//! controllers at construction.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat server location and endpoint paths
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Token sent with every mutating request
    #[serde(default)]
    pub csrf_token: Option<String>,

    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    #[serde(default = "default_send_path")]
    pub send_message_path: String,

    #[serde(default = "default_coping_path")]
    pub coping_strategy_path: String,

    #[serde(default = "default_new_chat_path")]
    pub new_chat_path: String,

    #[serde(default = "default_clear_chat_path")]
    pub clear_chat_path: String,

    /// No timeout is applied unless one is configured
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_csrf_header() -> String {
    "X-CSRFToken".to_string()
}

fn default_send_path() -> String {
    "/send-message/".to_string()
}

fn default_coping_path() -> String {
    "/api/coping-strategy/".to_string()
}

fn default_new_chat_path() -> String {
    "/api/conversations/new/".to_string()
}

fn default_clear_chat_path() -> String {
    "/api/conversations/clear/".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: None,
            csrf_header: default_csrf_header(),
            send_message_path: default_send_path(),
            coping_strategy_path: default_coping_path(),
            new_chat_path: default_new_chat_path(),
            clear_chat_path: default_clear_chat_path(),
            request_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Same-origin configuration used by the browser front end
    pub fn same_origin(csrf_token: Option<String>) -> Self {
        Self {
            base_url: String::new(),
            csrf_token,
            ..Default::default()
        }
    }
}

/// Chat page behaviour and timings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// First transcript entry, never removed
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    #[serde(default = "default_error_dismiss")]
    pub error_dismiss_ms: u64,

    #[serde(default = "default_success_dismiss")]
    pub success_dismiss_ms: u64,

    #[serde(default = "default_send_flash")]
    pub send_flash_ms: u64,

    #[serde(default = "default_scroll_debounce")]
    pub scroll_debounce_ms: u64,

    #[serde(default = "default_overlay_reconcile")]
    pub overlay_reconcile_ms: u64,

    #[serde(default = "default_max_input_height")]
    pub max_input_height_px: u32,

    #[serde(default = "default_input_line_height")]
    pub input_line_height_px: u32,

    #[serde(default = "default_input_padding")]
    pub input_padding_px: u32,
}

fn default_welcome_message() -> String {
    "Hello! I'm your AI therapist. I'm here to listen and support you. \
     How are you feeling today?"
        .to_string()
}

fn default_error_dismiss() -> u64 {
    5000 // 5 seconds
}

fn default_success_dismiss() -> u64 {
    3000
}

fn default_send_flash() -> u64 {
    500
}

fn default_scroll_debounce() -> u64 {
    100
}

fn default_overlay_reconcile() -> u64 {
    50
}

fn default_max_input_height() -> u32 {
    120
}

fn default_input_line_height() -> u32 {
    24
}

fn default_input_padding() -> u32 {
    14
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            welcome_message: default_welcome_message(),
            error_dismiss_ms: default_error_dismiss(),
            success_dismiss_ms: default_success_dismiss(),
            send_flash_ms: default_send_flash(),
            scroll_debounce_ms: default_scroll_debounce(),
            overlay_reconcile_ms: default_overlay_reconcile(),
            max_input_height_px: default_max_input_height(),
            input_line_height_px: default_input_line_height(),
            input_padding_px: default_input_padding(),
        }
    }
}

impl ChatConfig {
    pub fn error_dismiss(&self) -> Duration {
        Duration::from_millis(self.error_dismiss_ms)
    }

    pub fn success_dismiss(&self) -> Duration {
        Duration::from_millis(self.success_dismiss_ms)
    }

    pub fn send_flash(&self) -> Duration {
        Duration::from_millis(self.send_flash_ms)
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    pub fn overlay_reconcile(&self) -> Duration {
        Duration::from_millis(self.overlay_reconcile_ms)
    }
}

/// Dashboard rendering timings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Delay before the single retry when the chart library is missing
    #[serde(default = "default_chart_retry")]
    pub chart_retry_delay_ms: u64,

    #[serde(default = "default_counter_steps")]
    pub counter_steps: u32,

    #[serde(default = "default_counter_tick")]
    pub counter_tick_ms: u64,

    #[serde(default = "default_insight_stagger")]
    pub insight_stagger_ms: u64,
}

fn default_chart_retry() -> u64 {
    100
}

fn default_counter_steps() -> u32 {
    50
}

fn default_counter_tick() -> u64 {
    30
}

fn default_insight_stagger() -> u64 {
    200
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_retry_delay_ms: default_chart_retry(),
            counter_steps: default_counter_steps(),
            counter_tick_ms: default_counter_tick(),
            insight_stagger_ms: default_insight_stagger(),
        }
    }
}

impl DashboardConfig {
    pub fn chart_retry_delay(&self) -> Duration {
        Duration::from_millis(self.chart_retry_delay_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        #[cfg(feature = "native")]
        let user_config = dirs::config_dir().map(|p| p.join("aitherapist").join("config.toml"));
        #[cfg(not(feature = "native"))]
        let user_config: Option<PathBuf> = None;

        let config_paths = [user_config, Some(PathBuf::from("./aitherapist.toml"))];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("AITHERAPIST_SERVER_URL") {
            self.server.base_url = url;
        }
        if let Ok(token) = std::env::var("AITHERAPIST_CSRF_TOKEN") {
            self.server.csrf_token = Some(token);
        }

        if let Ok(level) = std::env::var("AITHERAPIST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AITHERAPIST_LOG_FORMAT") {
            self.logging.format = format;
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
    r#"# AI Therapist client configuration
#
# Environment variables override these settings:
# - AITHERAPIST_SERVER_URL
# - AITHERAPIST_CSRF_TOKEN
# - AITHERAPIST_LOG_LEVEL
# - AITHERAPIST_LOG_FORMAT

[server]
# Chat server base URL
base_url = "http://localhost:8000"

# CSRF token sent with every mutating request
# csrf_token = ""
csrf_header = "X-CSRFToken"

send_message_path = "/send-message/"
coping_strategy_path = "/api/coping-strategy/"
new_chat_path = "/api/conversations/new/"
clear_chat_path = "/api/conversations/clear/"

# Optional request timeout in seconds (none by default)
# request_timeout_secs = 30

[chat]
# How long error notifications stay visible (ms)
error_dismiss_ms = 5000

# How long success notifications stay visible (ms)
success_dismiss_ms = 3000

# Delay before scrolling the transcript after an append (ms)
scroll_debounce_ms = 100

# Maximum height of the message input (px)
max_input_height_px = 120

[dashboard]
# Delay before retrying when the chart library is not loaded yet (ms)
chart_retry_delay_ms = 100

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.send_message_path, "/send-message/");
        assert_eq!(config.server.csrf_header, "X-CSRFToken");
        assert!(config.server.request_timeout_secs.is_none());
        assert_eq!(config.chat.error_dismiss(), Duration::from_secs(5));
        assert_eq!(config.chat.max_input_height_px, 120);
        assert_eq!(config.dashboard.chart_retry_delay_ms, 100);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::from_toml(&generate_default_config()).unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            [server]
            base_url = "https://therapist.example"
            csrf_token = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.csrf_token.as_deref(), Some("abc"));
        assert_eq!(config.server.coping_strategy_path, "/api/coping-strategy/");
        assert_eq!(config.chat.scroll_debounce_ms, 100);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml("[server]\nbase_url = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
