//! Axum router for the WebSocket transport.
//! Routes: `GET /mcp` (upgrade), `GET /health` (liveness),
//! `GET /health/ready` (readiness), `GET /` (service info).

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::debug;

use toolgate_rpc::{Connection, Dispatcher};

use crate::frames::WsFrames;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The request dispatcher shared by every socket.
    pub dispatcher: Arc<Dispatcher>,
    /// Messages longer than this close the socket.
    pub max_frame_bytes: usize,
}

/// Builds the axum `Router` with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_info))
        .route("/mcp", get(handle_upgrade))
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "toolgate"}))
}

/// Readiness probe: `200 OK` once the router is serving.
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": "toolgate"}))
}

async fn handle_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": "toolgate",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoint": "/mcp",
        "tools": state.dispatcher.registry().len(),
    }))
}

async fn handle_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.max_message_size(state.max_frame_bytes)
        .on_upgrade(move |socket| async move {
            let io = WsFrames::new(socket, state.max_frame_bytes);
            let summary = Connection::new(io, state.dispatcher).run().await;
            debug!(requests = summary.requests, reason = %summary.reason, "websocket closed");
        })
}
