//! HTTP server that binds the WebSocket router to a TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use toolgate_rpc::Dispatcher;

use crate::error::WsTransportError;
use crate::router::{build_router, AppState};

/// Axum-based server for the WebSocket transport.
pub struct WsServer {
    listener: TcpListener,
    state: AppState,
}

impl WsServer {
    /// Binds `addr`.
    ///
    /// # Errors
    ///
    /// Returns `WsTransportError::Bind` if the address cannot be bound.
    pub async fn bind(
        addr: &str,
        dispatcher: Arc<Dispatcher>,
        max_frame_bytes: usize,
    ) -> Result<Self, WsTransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| WsTransportError::Bind {
                addr: addr.to_string(),
                source: e,
            })?;
        Ok(Self {
            listener,
            state: AppState {
                dispatcher,
                max_frame_bytes,
            },
        })
    }

    /// The bound address (useful with port `0`).
    pub fn local_addr(&self) -> Result<SocketAddr, WsTransportError> {
        self.listener.local_addr().map_err(WsTransportError::LocalAddr)
    }

    /// Serves until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns `WsTransportError::Serve` if the server crashes.
    pub async fn run(self) -> Result<(), WsTransportError> {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(%addr, "websocket server ready on /mcp");
        }

        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .await
            .map_err(|e| WsTransportError::Serve(e.to_string()))
    }
}
