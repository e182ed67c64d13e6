//! Backend Error Module
//!
//! Error types for the notification server, convertible into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Explicit status (e.g. 404 couple not found)
//! - `StateError` - Server dependencies unavailable
//! - `ProtocolError` - Malformed webhook payload
//! - `SharedError` - Validation errors from the shared module

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
