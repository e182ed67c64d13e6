//! Shared Module
//!
//! Types used by both the client-side offline queue and the notification
//! backend. Everything here is plain data that serializes to JSON.

/// Queued write operations
pub mod action;

/// Push notification payload
pub mod notification;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

pub use action::{ActionId, ActionKind, QueuedAction};
pub use notification::{NotificationData, PushNotification};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, FailurePolicy};
