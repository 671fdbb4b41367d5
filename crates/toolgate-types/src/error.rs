//! Error type returned by tool handlers.

use thiserror::Error;

/// A tool handler failure.
///
/// The dispatcher treats it as opaque and forwards only its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// Resource not found (unknown runbook, missing file, ...).
    #[error("{0}")]
    NotFound(String),

    /// The caller lacks the right to perform the operation.
    #[error("{0}")]
    PermissionDenied(String),

    /// Invalid input data.
    #[error("{0}")]
    InvalidInput(String),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl GateError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
