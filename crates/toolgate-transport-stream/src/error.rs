//! Transport-layer error types.

use thiserror::Error;

/// Errors from the TCP listener.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind the listen address.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// Could not read back the bound address.
    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),
}
