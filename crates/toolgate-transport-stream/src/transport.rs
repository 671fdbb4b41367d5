//! Line-delimited frame transport.
//!
//! Each frame is a single line terminated by `\n`. Lines longer than the
//! configured limit corrupt the stream: the rest of the line cannot be
//! told apart from the next frame, so the connection is closed.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

use toolgate_rpc::{FrameError, FrameIo};

/// Default frame limit (1 MiB).
pub const DEFAULT_MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Reads frames from a byte stream, writes frames back.
///
/// Generic over reader/writer so the same type serves TCP halves,
/// stdin/stdout and in-memory pipes in tests.
pub struct LineTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
    max_frame_bytes: usize,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new transport with the default frame limit.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }

    /// Sets the maximum frame length in bytes, excluding the `\n` or
    /// `\r\n` terminator.
    pub fn with_max_frame_bytes(mut self, max: usize) -> Self {
        self.max_frame_bytes = max;
        self
    }

    /// Reads the next line.
    ///
    /// Returns `None` on EOF. A final line without a trailing newline is
    /// still returned as a frame.
    pub async fn read_line(&mut self) -> Result<Option<String>, FrameError> {
        // Room for the longest accepted frame plus a `\r\n` terminator.
        let limit = self.max_frame_bytes as u64 + 2;
        let mut buf = Vec::new();
        let bytes_read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| FrameError::Read(e.to_string()))?;

        if bytes_read == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        if buf.len() > self.max_frame_bytes {
            return Err(FrameError::Corrupted(format!(
                "frame exceeds {} bytes",
                self.max_frame_bytes
            )));
        }

        let line = String::from_utf8(buf)
            .map_err(|_| FrameError::Corrupted("frame is not valid UTF-8".to_string()))?;
        let trimmed = line.trim();
        trace!(len = trimmed.len(), "read frame");
        Ok(Some(trimmed.to_string()))
    }

    /// Writes one frame followed by a newline and flushes.
    pub async fn write_line(&mut self, message: &str) -> Result<(), FrameError> {
        trace!(len = message.len(), "writing frame");

        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(|e| FrameError::Write(e.to_string()))?;

        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| FrameError::Write(e.to_string()))?;

        self.writer
            .flush()
            .await
            .map_err(|e| FrameError::Write(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl<R, W> FrameIo for LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn recv_frame(&mut self) -> Result<Option<String>, FrameError> {
        self.read_line().await
    }

    async fn send_frame(&mut self, frame: &str) -> Result<(), FrameError> {
        self.write_line(frame).await
    }
}
