//! Shared Error Types
//!
//! This module defines error types that are shared between the client queue and
//! the notification backend.
//!
//! # Error Categories
//!
//! - `ValidationError` - Data validation failures (e.g. a webhook record missing a field)
//!
//! # Usage
//!
//! ```rust
//! use hearth::shared::error::SharedError;
//!
//! let error = SharedError::validation("record.couple_id", "missing couple identifier");
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
