/**
 * Backend Error Types
 *
 * Errors raised while serving the notification webhook. Every variant maps to
 * an HTTP status and converts into a JSON response (see `conversion`).
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Carry an explicit status, e.g. 404 for an unknown couple.
 *
 * ## State Errors
 *
 * The server could not assemble its dependencies (database pool, push client).
 *
 * ## Protocol Errors
 *
 * The webhook body is not a valid database-change event.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// ```rust
/// use hearth::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "couple not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
///
/// let err = BackendError::protocol("invalid webhook payload");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request failed with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    /// Server dependencies unavailable
    #[error("State error: {message}")]
    StateError {
        message: String,
    },

    /// Malformed webhook payload
    #[error("Protocol error: {message}")]
    ProtocolError {
        message: String,
    },

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// HTTP status for this error
    ///
    /// - `HandlerError` - the carried status
    /// - `StateError` - 503 Service Unavailable
    /// - `ProtocolError` - 400 Bad Request
    /// - `SharedError` - 400 Bad Request
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StateError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProtocolError { .. } => StatusCode::BAD_REQUEST,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
        }
    }

    /// Human-readable error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StateError { message } => message.clone(),
            Self::ProtocolError { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}
