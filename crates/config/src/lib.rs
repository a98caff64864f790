//! Configuration loading, validation, and management for Sustainly.
//!
//! Loads configuration from `~/.sustainly/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.sustainly/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Template and trigger-log storage
    #[serde(default)]
    pub store: StoreConfig,

    /// Weekly likelihood report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Prompt rendering settings
    #[serde(default)]
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "sqlite" or "in_memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// SQLite database path; relative paths resolve against the config dir.
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Load the bundled templates into an empty store on startup.
    #[serde(default = "default_true")]
    pub seed_builtin: bool,
}

fn default_store_backend() -> String {
    "sqlite".into()
}
fn default_store_path() -> String {
    "sustainly.db".into()
}
fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
            seed_builtin: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Length of one reporting period in days.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Compare against the preceding period when it has enough data.
    #[serde(default = "default_true")]
    pub compare_previous: bool,
}

fn default_lookback_days() -> u32 {
    7
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            compare_previous: true,
        }
    }
}

/// Markers substituted for `{Trend}` in comparison prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    #[serde(default = "default_trend_up")]
    pub trend_up: String,

    #[serde(default = "default_trend_down")]
    pub trend_down: String,

    #[serde(default = "default_trend_flat")]
    pub trend_flat: String,
}

fn default_trend_up() -> String {
    "↑".into()
}
fn default_trend_down() -> String {
    "↓".into()
}
fn default_trend_flat() -> String {
    "→".into()
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            trend_up: default_trend_up(),
            trend_down: default_trend_down(),
            trend_flat: default_trend_flat(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.sustainly/config.toml).
    ///
    /// Environment overrides:
    /// - `SUSTAINLY_STORE_BACKEND`
    /// - `SUSTAINLY_STORE_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(backend) = std::env::var("SUSTAINLY_STORE_BACKEND") {
            config.store.backend = backend;
        }
        if let Ok(path) = std::env::var("SUSTAINLY_STORE_PATH") {
            config.store.path = path;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".sustainly")
    }

    /// SQLite connection string for the configured store path.
    pub fn store_url(&self) -> String {
        if self.store.path.contains(":memory:") {
            return "sqlite::memory:".into();
        }
        let path = Path::new(&self.store.path);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            Self::config_dir().join(path)
        };
        format!("sqlite://{}", path.display())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.store.backend.as_str(), "sqlite" | "in_memory") {
            return Err(ConfigError::ValidationError(format!(
                "store.backend must be \"sqlite\" or \"in_memory\", got \"{}\"",
                self.store.backend
            )));
        }

        if self.store.backend == "sqlite" && self.store.path.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store.path must not be empty for the sqlite backend".into(),
            ));
        }

        if self.report.lookback_days == 0 {
            return Err(ConfigError::ValidationError(
                "report.lookback_days must be > 0".into(),
            ));
        }

        let markers = [
            &self.prompts.trend_up,
            &self.prompts.trend_down,
            &self.prompts.trend_flat,
        ];
        if markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::ValidationError(
                "trend markers must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.report.lookback_days, 7);
        assert!(config.report.compare_previous);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.store.path, config.store.path);
        assert_eq!(parsed.prompts.trend_up, config.prompts.trend_up);
    }

    #[test]
    fn unknown_backend_rejected() {
        let mut config = AppConfig::default();
        config.store.backend = "postgres".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_lookback_rejected() {
        let mut config = AppConfig::default();
        config.report.lookback_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_trend_marker_rejected() {
        let mut config = AppConfig::default();
        config.prompts.trend_flat = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.store.backend, "sqlite");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[report]\nlookback_days = 14\n\n[prompts]\ntrend_up = \"UP\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.report.lookback_days, 14);
        assert!(config.report.compare_previous);
        assert_eq!(config.prompts.trend_up, "UP");
        assert_eq!(config.prompts.trend_down, "↓");
    }

    #[test]
    fn invalid_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report\nlookback_days = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn store_url_resolves_paths() {
        let mut config = AppConfig::default();
        config.store.path = "/var/lib/sustainly/data.db".into();
        assert_eq!(config.store_url(), "sqlite:///var/lib/sustainly/data.db");

        config.store.path = ":memory:".into();
        assert_eq!(config.store_url(), "sqlite::memory:");

        config.store.path = "data.db".into();
        assert!(config.store_url().ends_with(".sustainly/data.db"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("lookback_days = 7"));
        assert!(toml_str.contains("sqlite"));
    }
}
