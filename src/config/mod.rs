//! Configuration management for farcaster-feed-export
//!
//! This module handles loading, parsing, and validating configuration from:
//! - Configuration files (TOML format)
//! - Environment variables (`NEYNAR_API_KEY`, resolved by the CLI layer)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Largest page size the feed endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Feed API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feed API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the feed API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API credential; usually supplied via `--api-key` or `NEYNAR_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of casts requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default number of pages to fetch
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Directory the CSV file is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Show a progress bar while fetching
    #[serde(default = "default_progress")]
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Path to log file (None for stderr)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.neynar.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    25
}

fn default_max_pages() -> u32 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_progress() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl ApiConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            output_dir: default_output_dir(),
            progress: default_progress(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults
    ///
    /// With `None` the default location is used, and a missing file there
    /// simply yields the default configuration. An explicitly given path
    /// must exist.
    ///
    /// # Arguments
    /// * `path` - Optional path to a TOML configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_config_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidFormat(e.to_string()).into())
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - `<config dir>/farcaster-feed-export/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("farcaster-feed-export")
            .join("config.toml")
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(invalid("api.base_url", &self.api.base_url));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", self.api.timeout_secs));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.api.page_size) {
            return Err(invalid("api.page_size", self.api.page_size));
        }
        Ok(())
    }

    /// Render the configuration as TOML with a short header
    ///
    /// The API key is redacted.
    pub fn to_toml_with_comments(&self) -> Result<String> {
        let mut redacted = self.clone();
        if redacted.api.api_key.is_some() {
            redacted.api.api_key = Some("***".to_string());
        }
        let body = toml::to_string_pretty(&redacted)?;
        Ok(format!(
            "# farcaster-feed-export configuration\n# Default location: {}\n\n{}",
            Self::default_config_path().display(),
            body
        ))
    }
}

fn invalid(field: &str, value: impl ToString) -> crate::error::FeedExportError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}
