//! WebSocket transport adapter for toolgate.
//! Exposes the dispatcher on `GET /mcp` (one socket = one connection),
//! plus liveness, readiness and service-info endpoints.

mod error;
pub mod frames;
pub mod router;
pub mod server;

pub use error::WsTransportError;
pub use frames::WsFrames;
pub use router::{build_router, AppState};
pub use server::WsServer;
