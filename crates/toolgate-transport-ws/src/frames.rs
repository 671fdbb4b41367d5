//! `FrameIo` over an upgraded WebSocket.

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use tracing::trace;

use toolgate_rpc::{FrameError, FrameIo};

/// Text messages in, text messages out. Ping/pong are handled by the
/// socket; a binary message corrupts the stream.
pub struct WsFrames {
    socket: WebSocket,
    max_frame_bytes: usize,
}

impl WsFrames {
    pub fn new(socket: WebSocket, max_frame_bytes: usize) -> Self {
        Self {
            socket,
            max_frame_bytes,
        }
    }
}

#[async_trait]
impl FrameIo for WsFrames {
    async fn recv_frame(&mut self) -> Result<Option<String>, FrameError> {
        loop {
            match self.socket.recv().await {
                None | Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(Message::Text(text))) => {
                    if text.len() > self.max_frame_bytes {
                        return Err(FrameError::Corrupted(format!(
                            "frame exceeds {} bytes",
                            self.max_frame_bytes
                        )));
                    }
                    trace!(len = text.len(), "read frame");
                    return Ok(Some(text.as_str().to_string()));
                }
                Some(Ok(Message::Binary(_))) => {
                    return Err(FrameError::Corrupted(
                        "binary frames are not supported".to_string(),
                    ))
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Err(e)) => return Err(FrameError::Read(e.to_string())),
            }
        }
    }

    async fn send_frame(&mut self, frame: &str) -> Result<(), FrameError> {
        trace!(len = frame.len(), "writing frame");
        self.socket
            .send(Message::Text(frame.into()))
            .await
            .map_err(|e| FrameError::Write(e.to_string()))
    }
}
