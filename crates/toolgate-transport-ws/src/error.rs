//! Error types for the WebSocket transport layer.

use thiserror::Error;

/// Errors that can occur in the WebSocket transport.
#[derive(Debug, Error)]
pub enum WsTransportError {
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Could not read back the bound address.
    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),
    /// The HTTP server encountered an I/O error while serving.
    #[error("server error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_displays_address() {
        let err = WsTransportError::Bind {
            addr: "127.0.0.1:9000".into(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert!(err.to_string().contains("127.0.0.1:9000"));
    }
}
