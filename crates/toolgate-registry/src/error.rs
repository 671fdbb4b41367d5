//! Errors raised by the registry and the store ports.

use thiserror::Error;

/// Errors returned by context-store and audit-sink implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database or I/O error occurred.
    #[error("storage error: {message}")]
    Storage { message: String },
    /// The backing store is temporarily unreachable.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors raised while building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A catalog entry has no handler bound to it.
    #[error("no handler bound for tool '{name}'")]
    Unbound { name: String },
}
