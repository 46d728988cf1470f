//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ClientConfig, Period};
use crate::toast::ToastSettings;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub toasts: ToastsConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Preset session cookie (`name=value`)
    #[serde(default)]
    pub session_cookie: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            session_cookie: None,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
            session_cookie: self.session_cookie.clone(),
        }
    }
}

/// Toast timing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ToastsConfig {
    #[serde(default = "default_toast_duration")]
    pub default_duration_ms: u64,

    #[serde(default = "default_exit_animation")]
    pub exit_animation_ms: u64,
}

fn default_toast_duration() -> u64 {
    3000
}

fn default_exit_animation() -> u64 {
    300
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_toast_duration(),
            exit_animation_ms: default_exit_animation(),
        }
    }
}

impl ToastsConfig {
    pub fn settings(&self) -> ToastSettings {
        ToastSettings {
            default_duration: Duration::from_millis(self.default_duration_ms),
            exit_animation: Duration::from_millis(self.exit_animation_ms),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    /// Analysis period selected on startup
    #[serde(default)]
    pub default_period: Period,
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from an explicit path, or else from the default locations.
    ///
    /// An explicit path that cannot be loaded is an error; default
    /// locations that fail are skipped.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("finboard").join("config.toml")),
            Some(PathBuf::from("./finboard.toml")),
        ];

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

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a variable lookup
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = var("FINBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(session) = var("FINBOARD_SESSION") {
            self.api.session_cookie = Some(session);
        }

        // Toast overrides
        if let Some(duration) = var("FINBOARD_TOAST_DURATION_MS") {
            match duration.parse() {
                Ok(ms) => self.toasts.default_duration_ms = ms,
                Err(_) => {
                    tracing::warn!(value = %duration, "Ignoring invalid FINBOARD_TOAST_DURATION_MS")
                }
            }
        }

        // Logging overrides
        if let Some(level) = var("FINBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FINBOARD_LOG_FORMAT") {
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
    r#"# Finboard Configuration
#
# Environment variables override these settings:
# - FINBOARD_API_URL
# - FINBOARD_SESSION
# - FINBOARD_TOAST_DURATION_MS
# - FINBOARD_LOG_LEVEL
# - FINBOARD_LOG_FORMAT

[api]
# Backend base URL
base_url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

# Session cookie sent with every request
# session_cookie = "session=..."

[toasts]
# How long a toast stays up before auto-dismiss (ms)
default_duration_ms = 3000

# Exit animation before a dismissed toast is removed (ms)
exit_animation_ms = 300

[dashboard]
# Analysis period on startup: week, month or year
default_period = "month"

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
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.toasts.default_duration_ms, 3000);
        assert_eq!(config.toasts.exit_animation_ms, 300);
        assert_eq!(config.dashboard.default_period, Period::Month);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.api.request_timeout_secs, defaults.api.request_timeout_secs);
        assert!(config.api.session_cookie.is_none());
        assert_eq!(config.toasts.default_duration_ms, defaults.toasts.default_duration_ms);
        assert_eq!(config.dashboard.default_period, defaults.dashboard.default_period);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
[api]
base_url = "https://finance.example.com"

[toasts]
default_duration_ms = 5000

[dashboard]
default_period = "week"
"#,
        );

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://finance.example.com");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.toasts.default_duration_ms, 5000);
        assert_eq!(config.toasts.exit_animation_ms, 300);
        assert_eq!(config.dashboard.default_period, Period::Week);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/finboard.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let file = write_config("[dashboard]\ndefault_period = \"decade\"\n");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_resolve_explicit_path_must_load() {
        let result = Config::resolve(Some(Path::new("/nonexistent/finboard.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FINBOARD_API_URL", "http://127.0.0.1:9000"),
            ("FINBOARD_SESSION", "session=abc"),
            ("FINBOARD_TOAST_DURATION_MS", "1500"),
            ("FINBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.session_cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.toasts.default_duration_ms, 1500);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_duration_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "FINBOARD_TOAST_DURATION_MS").then(|| "soon".to_string())
        });
        assert_eq!(config.toasts.default_duration_ms, 3000);
    }

    #[test]
    fn test_conversions() {
        let config = Config::default();

        let client = config.api.client_config();
        assert_eq!(client.request_timeout_ms, 30_000);

        let settings = config.toasts.settings();
        assert_eq!(settings.default_duration, Duration::from_millis(3000));
        assert_eq!(settings.exit_animation, Duration::from_millis(300));
    }
}
