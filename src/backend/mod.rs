//! Backend Module
//!
//! Notification server for Hearth. The hosted database calls
//! `POST /webhooks/notify` for every row change; inserted messages and
//! surprises become a push notification for the sender's partner.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`notify`** - Webhook parsing, lookups, dispatch, push delivery
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - hearth-notify binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── notify/         - Notification dispatcher
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! - Malformed payloads answer 400
//! - Unknown couples answer 404
//! - Missing optional data (name, push token) and push failures still answer 200

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Notification dispatcher
pub mod notify;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use notify::{DispatchOutcome, Dispatcher};
pub use server::{create_app, create_app_from_config};
