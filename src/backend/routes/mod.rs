//! Route Configuration Module
//!
//! HTTP routes of the notification server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs           - Module exports and documentation
//! ├── router.rs        - Main router creation
//! └── notify_routes.rs - Webhook routes
//! ```

/// Main router creation
pub mod router;

/// Webhook routes
pub mod notify_routes;

pub use router::create_router;
