/**
 * Server Configuration
 *
 * Environment-driven settings for the notification server.
 *
 * # Variables
 *
 * - `DATABASE_URL` - PostgreSQL connection string (required)
 * - `PUSH_GATEWAY_URL` - push service endpoint (default: Expo)
 * - `PUSH_TIMEOUT_SECS` - bound for one gateway call (default: 5)
 * - `EXPO_ACCESS_TOKEN` - optional push service access token
 * - `SERVER_PORT` - listen port (default: 3000)
 */

use std::time::Duration;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::backend::error::BackendError;
use crate::backend::notify::push::{DEFAULT_PUSH_GATEWAY_URL, DEFAULT_PUSH_TIMEOUT};

const DEFAULT_PORT: u16 = 3000;

/// Notification server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub database_url: String,
    pub push_gateway_url: String,
    pub push_timeout: Duration,
    pub push_access_token: Option<String>,
    pub port: u16,
}

impl NotifyConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    ///
    /// Unparseable numeric values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BackendError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| BackendError::state("DATABASE_URL is not set"))?;

        let push_gateway_url = lookup("PUSH_GATEWAY_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PUSH_GATEWAY_URL.to_string());

        let push_timeout = match lookup("PUSH_TIMEOUT_SECS").map(|raw| raw.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!("Invalid PUSH_TIMEOUT_SECS, using {:?}", DEFAULT_PUSH_TIMEOUT);
                DEFAULT_PUSH_TIMEOUT
            }
            None => DEFAULT_PUSH_TIMEOUT,
        };

        let port = match lookup("SERVER_PORT").map(|raw| raw.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                tracing::warn!("Invalid SERVER_PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            push_gateway_url,
            push_timeout,
            push_access_token: lookup("EXPO_ACCESS_TOKEN").filter(|t| !t.is_empty()),
            port,
        })
    }
}

/// Connect the PostgreSQL pool used for directory lookups
///
/// The schema is owned by the database project; no migrations run here.
pub async fn connect_database(database_url: &str) -> Result<PgPool, BackendError> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            BackendError::state(format!("database unavailable: {}", e))
        })?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}
