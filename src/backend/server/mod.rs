//! Server Module
//!
//! Initialization and configuration of the Axum notification server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs      - Module exports and documentation
//! ├── state.rs    - AppState and FromRef implementations
//! ├── config.rs   - Environment configuration and database pool
//! └── init.rs     - App creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use hearth::backend::server::{create_app_from_config, NotifyConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NotifyConfig::from_env()?;
//! let app = create_app_from_config(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::NotifyConfig;
pub use init::{create_app, create_app_from_config};
pub use state::AppState;
