//! Configuration System
//!
//! Handles loading the terminal client's configuration from files and
//! environment variables. Supports TOML config files and environment
//! variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DEFAULT_API_BASE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scan backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Local scan history configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_file")]
    pub file: String,
}

fn default_history_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("phishscan").join("history.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./phishscan_history.json".to_string())
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: default_history_file(),
        }
    }
}

impl HistoryConfig {
    /// History file path, with a leading `~` expanded to the home directory
    pub fn path(&self) -> PathBuf {
        expand_home(&self.file)
    }
}

fn expand_home(file: &str) -> PathBuf {
    let rest = match file.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(file),
    };

    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => {
            tracing::warn!("No home directory to expand {:?}, using it as is", file);
            PathBuf::from(file)
        }
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

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
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
        let config_paths = [
            dirs::config_dir().map(|p| p.join("phishscan").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = var("PHISHSCAN_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("PHISHSCAN_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid PHISHSCAN_TIMEOUT_SECS={}", timeout),
            }
        }

        // History overrides
        if let Some(file) = var("PHISHSCAN_HISTORY_FILE") {
            self.history.file = file;
        }

        // Logging overrides
        if let Some(level) = var("PHISHSCAN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PHISHSCAN_LOG_FORMAT") {
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
    r#"# PhishScan Configuration
#
# Environment variables override these settings:
# - PHISHSCAN_API_URL
# - PHISHSCAN_TIMEOUT_SECS
# - PHISHSCAN_HISTORY_FILE
# - PHISHSCAN_LOG_LEVEL
# - PHISHSCAN_LOG_FORMAT

[api]
# Origin of the scan backend
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 30

[history]
# Local scan history (the 50 most recent scans). Defaults to the platform
# data directory, e.g. ~/.local/share/phishscan/history.json
# file = "~/.local/share/phishscan/history.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for terminals) or json (for log collectors)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
        assert!(config.history.file.ends_with("history.json"));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.history.path().is_absolute());
    }

    #[test]
    fn test_history_path_expands_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let config = Config::parse("[history]\nfile = \"~/.local/share/phishscan/history.json\"\n").unwrap();
        assert_eq!(
            config.history.path(),
            home.join(".local/share/phishscan/history.json")
        );
        assert!(config.history.path().is_absolute());

        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("~other/h.json"), PathBuf::from("~other/h.json"));
        assert_eq!(expand_home("./h.json"), PathBuf::from("./h.json"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[logging]\nformat = \"json\"\n").unwrap();
        assert!(config.logging.is_json());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(Config::load(&path), Err(ConfigError::Io { .. })));

        std::fs::write(&path, "[api\nbase_url = 1").unwrap();
        match Config::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PHISHSCAN_API_URL", "https://scan.example.org"),
            ("PHISHSCAN_TIMEOUT_SECS", "not-a-number"),
            ("PHISHSCAN_HISTORY_FILE", "/tmp/h.json"),
            ("PHISHSCAN_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://scan.example.org");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.history.path(), PathBuf::from("/tmp/h.json"));
        assert!(config.logging.is_json());
    }
}
