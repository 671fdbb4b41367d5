//! # toolgate-rpc
//!
//! The request path of toolgate: [`Dispatcher`] turns one raw frame into
//! one response frame (parse, validate, route, authorize, invoke, audit),
//! and [`connection::Connection`] drives the read/dispatch/write loop of a
//! single client over any [`connection::FrameIo`].

pub mod connection;
mod dispatch;
pub mod dispatcher;
pub mod error;

pub use connection::{
    CloseReason, Connection, ConnectionState, ConnectionSummary, FrameError, FrameIo,
};
pub use dispatcher::{Dispatcher, DEFAULT_TOOL_TIMEOUT};
pub use error::DispatchError;
