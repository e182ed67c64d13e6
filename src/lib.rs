//! Hearth - Core Library
//!
//! Core of the Hearth couples app: the client-side offline action queue and
//! the server-side notification dispatcher.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and server
//!   - Queued actions, push notification payloads
//!   - Configuration and error types
//!
//! - **`app`** - Client-side code
//!   - `OfflineQueue` with durable SQLite persistence
//!   - Remote writer for the hosted database
//!   - Network monitor driving queue replay
//!
//! - **`backend`** - Notification server (only compiled with `ssr` feature)
//!   - Axum webhook endpoint for database-change events
//!   - Couple/profile lookups and push gateway delivery
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the `backend` module and the `hearth-notify` binary
//!   (on by default)
//!
//! # Usage
//!
//! ## Client
//!
//! ```rust,no_run
//! use hearth::app::{Config, LocalDatabase, OfflineQueue};
//! use hearth::shared::ActionKind;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new();
//! let db = LocalDatabase::open(config.database_path()).await?;
//! let queue = OfflineQueue::open(Arc::new(db), Arc::new(config.remote()?), config.queue_config()).await?;
//!
//! queue.enqueue(ActionKind::SendMessage, serde_json::json!({ "content": "hi" })).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Server
//!
//! ```rust,no_run
//! use hearth::backend::server::{create_app_from_config, NotifyConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app_from_config(&NotifyConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and utilities
pub mod shared;

/// Client-side offline queue
pub mod app;

/// Notification server
#[cfg(feature = "ssr")]
pub mod backend;
