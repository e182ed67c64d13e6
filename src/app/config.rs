use crate::app::local_db::LocalDatabase;
use crate::app::offline::queue::QueueConfig;
use crate::app::offline::remote::{RemoteError, RestRemote};
use crate::app::sync::NetworkMonitor;
use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default remote URL (local Supabase stack)
const DEFAULT_REMOTE_URL: &str = "http://127.0.0.1:54321";

/// Client configuration wrapper with environment overrides.
///
/// `HEARTH_REMOTE_URL` and `HEARTH_ANON_KEY` take precedence over file and
/// builder values.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_app(AppConfig::default())
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self::from_app(builder.build()?))
    }

    /// Load a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::from_app(AppConfig::from_file(path)?))
    }

    fn from_app(mut app: AppConfig) -> Self {
        if let Ok(url) = std::env::var("HEARTH_REMOTE_URL") {
            match reqwest::Url::parse(&url) {
                Ok(_) => app.remote_url = Some(url),
                Err(e) => tracing::warn!("Ignoring invalid HEARTH_REMOTE_URL {:?}: {}", url, e),
            }
        }
        if let Ok(key) = std::env::var("HEARTH_ANON_KEY") {
            app.anon_key = Some(key);
        }
        Self { app }
    }

    pub fn remote_url(&self) -> &str {
        self.app.remote_url.as_deref().unwrap_or(DEFAULT_REMOTE_URL)
    }

    pub fn anon_key(&self) -> Option<&str> {
        self.app.anon_key.as_deref()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.app.request_timeout_secs)
    }

    /// Where the offline queue is persisted
    pub fn database_path(&self) -> PathBuf {
        self.app
            .database_path
            .clone()
            .unwrap_or_else(LocalDatabase::default_path)
    }

    pub fn probe_url(&self) -> Option<&str> {
        self.app.probe_url.as_deref()
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.app.probe_interval_secs)
    }

    /// Start polling the reachability URL, when one is configured
    pub fn spawn_reachability_check(&self, monitor: &NetworkMonitor) -> Option<JoinHandle<()>> {
        let url = self.probe_url()?;
        tracing::info!(%url, interval = ?self.probe_interval(), "Starting reachability checks");
        Some(monitor.spawn_probe(url.to_string(), self.probe_interval(), self.request_timeout()))
    }

    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig::from(&self.app)
    }

    /// Remote writer configured from these settings
    pub fn remote(&self) -> Result<RestRemote, RemoteError> {
        RestRemote::new(
            self.remote_url(),
            self.anon_key().unwrap_or_default(),
            self.request_timeout(),
        )
    }
}
