//! Application configuration module
//!
//! Provides the client configuration shared by the offline queue, the remote
//! writer and the connectivity probe. Values come from a builder or from a TOML
//! file:
//!
//! ```toml
//! remote_url = "https://project.supabase.co"
//! anon_key = "public-anon-key"
//! flush_debounce_ms = 1000
//! failure_policy = "halt"
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_FLUSH_DEBOUNCE_MS: u64 = 1000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PROBE_INTERVAL_SECS: u64 = 15;

/// What a flush pass does when one action fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the pass at the first failure, keeping later actions untouched
    #[default]
    #[serde(alias = "halt_on_failure")]
    Halt,
    /// Leave the failed action in place and keep delivering the rest
    #[serde(alias = "skip_and_continue")]
    Skip,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the remote data store
    pub remote_url: Option<String>,
    /// Public API key sent with every remote write
    pub anon_key: Option<String>,
    /// Delay before an automatic flush runs
    pub flush_debounce_ms: u64,
    pub failure_policy: FailurePolicy,
    /// Upper bound for a single remote request
    pub request_timeout_secs: u64,
    /// Location of the local SQLite file; platform data dir when unset
    pub database_path: Option<PathBuf>,
    /// URL probed to decide whether the network is actually reachable
    pub probe_url: Option<String>,
    pub probe_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            anon_key: None,
            flush_debounce_ms: DEFAULT_FLUSH_DEBOUNCE_MS,
            failure_policy: FailurePolicy::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            database_path: None,
            probe_url: None,
            probe_interval_secs: DEFAULT_PROBE_INTERVAL_SECS,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for url in [&self.remote_url, &self.probe_url].into_iter().flatten() {
            check_url(url)?;
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::MissingValue("request_timeout_secs"));
        }
        if self.probe_interval_secs == 0 {
            return Err(ConfigError::MissingValue("probe_interval_secs"));
        }
        Ok(())
    }
}

fn check_url(url: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl(url.to_string())),
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the remote store URL
    pub fn remote_url(mut self, url: impl Into<String>) -> Self {
        self.config.remote_url = Some(url.into());
        self
    }

    /// Set the public API key
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.config.anon_key = Some(key.into());
        self
    }

    pub fn flush_debounce_ms(mut self, millis: u64) -> Self {
        self.config.flush_debounce_ms = millis;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = Some(path.into());
        self
    }

    pub fn probe_url(mut self, url: impl Into<String>) -> Self {
        self.config.probe_url = Some(url.into());
        self
    }

    pub fn probe_interval_secs(mut self, secs: u64) -> Self {
        self.config.probe_interval_secs = secs;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid configuration file: {0}")]
    Parse(String),
}
