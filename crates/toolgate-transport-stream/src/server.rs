//! TCP and stdio servers.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use toolgate_rpc::{Connection, ConnectionSummary, Dispatcher};

use crate::error::TransportError;
use crate::transport::LineTransport;

/// Accepts TCP clients and runs each on its own task.
pub struct TcpServer {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    max_frame_bytes: usize,
}

impl TcpServer {
    /// Binds `addr`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Bind` if the address cannot be bound.
    pub async fn bind(
        addr: &str,
        dispatcher: Arc<Dispatcher>,
        max_frame_bytes: usize,
    ) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| TransportError::Bind {
                addr: addr.to_string(),
                source: e,
            })?;
        Ok(Self {
            listener,
            dispatcher,
            max_frame_bytes,
        })
    }

    /// The bound address (useful with port `0`).
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.listener.local_addr().map_err(TransportError::LocalAddr)
    }

    /// Accepts connections forever.
    ///
    /// A failed `accept` is logged and skipped; it does not stop the
    /// server or affect open connections.
    pub async fn run(self) {
        match self.listener.local_addr() {
            Ok(addr) => info!(%addr, "tcp server listening"),
            Err(e) => warn!(error = %e, "tcp server listening on unknown address"),
        }

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };
            debug!(%peer, "connection accepted");

            let dispatcher = Arc::clone(&self.dispatcher);
            let max_frame_bytes = self.max_frame_bytes;
            tokio::spawn(async move {
                let (reader, writer) = stream.into_split();
                let io = LineTransport::new(reader, writer).with_max_frame_bytes(max_frame_bytes);
                let summary = Connection::new(io, dispatcher).run().await;
                debug!(%peer, requests = summary.requests, reason = %summary.reason, "connection finished");
            });
        }
    }
}

/// Serves a single connection over stdin/stdout until stdin closes.
pub async fn serve_stdio(dispatcher: Arc<Dispatcher>, max_frame_bytes: usize) -> ConnectionSummary {
    info!("serving on stdio");
    let io = LineTransport::new(tokio::io::stdin(), tokio::io::stdout())
        .with_max_frame_bytes(max_frame_bytes);
    Connection::new(io, dispatcher).run().await
}
