//! # Local Database Module
//!
//! Local SQLite storage for the client. The offline queue keeps its whole
//! retained sequence in a single named record of a small key/value table, read
//! once at startup and rewritten on every mutation.
//!
//! ## Key Components
//!
//! - `LocalDatabase`: connection pool and schema setup
//! - `store.rs`: the `ActionStore` seam used by the queue, with SQLite and in-memory implementations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hearth::app::local_db::LocalDatabase;
//!
//! # async fn example() -> Result<(), hearth::app::local_db::StoreError> {
//! let db = LocalDatabase::open(LocalDatabase::default_path()).await?;
//! db.put_record("greeting", "\"hello\"").await?;
//! assert_eq!(db.get_record("greeting").await?.as_deref(), Some("\"hello\""));
//! # Ok(())
//! # }
//! ```

pub mod store;

pub use store::{ActionStore, MemoryActionStore, QUEUE_RECORD_KEY};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by local persistence
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for local database operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Local database connection manager
#[derive(Debug, Clone)]
pub struct LocalDatabase {
    pool: SqlitePool,
}

impl LocalDatabase {
    /// Open or create the database file at `path`
    ///
    /// Creates parent directories and the schema when missing. Uses WAL mode.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.init_schema().await?;

        tracing::debug!(path = %path.display(), "Opened local database");
        Ok(db)
    }

    /// Platform-specific location of the database file
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("hearth");
        path.push("local.db");
        path
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Read a named record
    pub async fn get_record(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a named record
    pub async fn put_record(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
