//! # toolgate-transport-stream
//!
//! Newline-delimited frame transport for toolgate.
//!
//! Provides [`LineTransport`] over any async byte stream, a [`TcpServer`]
//! that runs one connection task per client, and [`serve_stdio`] for a
//! single connection over stdin/stdout.

pub mod error;
pub mod server;
pub mod transport;

pub use error::TransportError;
pub use server::{serve_stdio, TcpServer};
pub use transport::{LineTransport, DEFAULT_MAX_FRAME_BYTES};
