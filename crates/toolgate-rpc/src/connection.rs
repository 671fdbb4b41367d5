//! Per-connection request loop.
//!
//! A [`Connection`] owns one duplex of frames and answers them strictly
//! in order: one request in flight at a time.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::dispatcher::Dispatcher;

/// Errors from a frame transport.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Failed to read from the peer.
    #[error("read error: {0}")]
    Read(String),
    /// Failed to write to the peer.
    #[error("write error: {0}")]
    Write(String),
    /// The stream can no longer be framed (oversized frame, bad UTF-8,
    /// unexpected binary frame).
    #[error("corrupted stream: {0}")]
    Corrupted(String),
}

/// A frame-oriented duplex: text frames in, text frames out.
#[async_trait]
pub trait FrameIo: Send {
    /// Reads the next frame. `Ok(None)` means the peer closed cleanly.
    async fn recv_frame(&mut self) -> Result<Option<String>, FrameError>;

    /// Writes one frame and flushes it.
    async fn send_frame(&mut self, frame: &str) -> Result<(), FrameError>;
}

/// Where a connection is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Reading,
    Dispatching,
    Writing,
    Closed,
}

/// Why a connection reached [`ConnectionState::Closed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer closed the stream.
    PeerClosed,
    /// Reading failed.
    ReadError(String),
    /// Writing a response failed.
    WriteError(String),
    /// The stream could not be framed.
    Corrupted(String),
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerClosed => write!(f, "peer closed"),
            Self::ReadError(e) => write!(f, "read failed: {e}"),
            Self::WriteError(e) => write!(f, "write failed: {e}"),
            Self::Corrupted(e) => write!(f, "corrupted stream: {e}"),
        }
    }
}

/// Outcome of [`Connection::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSummary {
    /// Requests answered.
    pub requests: u64,
    /// Why the loop ended.
    pub reason: CloseReason,
}

/// One client connection.
pub struct Connection<F> {
    io: F,
    dispatcher: Arc<Dispatcher>,
    state: ConnectionState,
    requests: u64,
}

impl<F: FrameIo> Connection<F> {
    /// Creates a connection in the `Open` state.
    pub fn new(io: F, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            io,
            dispatcher,
            state: ConnectionState::Open,
            requests: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Runs the read/dispatch/write loop until the connection closes.
    ///
    /// Blank frames are skipped. Dropping the returned future cancels only
    /// this connection; an audit append already started still completes.
    pub async fn run(&mut self) -> ConnectionSummary {
        let reason = loop {
            self.transition(ConnectionState::Reading);
            let frame = match self.io.recv_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => break CloseReason::PeerClosed,
                Err(FrameError::Corrupted(e)) => break CloseReason::Corrupted(e),
                Err(e) => break CloseReason::ReadError(e.to_string()),
            };
            if frame.trim().is_empty() {
                continue;
            }

            self.transition(ConnectionState::Dispatching);
            let response = self.dispatcher.dispatch(&frame).await;
            self.requests += 1;

            self.transition(ConnectionState::Writing);
            if let Err(e) = self.io.send_frame(&response).await {
                break CloseReason::WriteError(e.to_string());
            }
        };

        self.transition(ConnectionState::Closed);
        match &reason {
            CloseReason::PeerClosed => debug!(requests = self.requests, "connection closed"),
            other => info!(requests = self.requests, reason = %other, "connection dropped"),
        }
        ConnectionSummary {
            requests: self.requests,
            reason,
        }
    }

    fn transition(&mut self, next: ConnectionState) {
        trace!(from = ?self.state, to = ?next, "connection state");
        self.state = next;
    }
}
