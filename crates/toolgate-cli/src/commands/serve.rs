//! `toolgate serve` command.
//!
//! Loads the catalog, binds builtin handlers, opens the stores and runs
//! the chosen transport until Ctrl-C.

use std::sync::Arc;

use clap::Args;

use toolgate_config::{GateConfig, TransportKind};
use toolgate_transport_stream::{serve_stdio, TcpServer};
use toolgate_transport_ws::WsServer;

use crate::shared;

/// Start the gateway.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport: tcp, ws or stdio (defaults to `server.transport`).
    #[arg(long)]
    pub transport: Option<TransportKind>,
    /// Listen address for tcp/ws (defaults to `server.listen`).
    #[arg(long)]
    pub listen: Option<String>,
    /// Catalog file (defaults to `catalog.path`).
    #[arg(long)]
    pub catalog: Option<String>,
    /// Keep context and audit records in memory only.
    #[arg(long)]
    pub memory: bool,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &GateConfig) -> anyhow::Result<()> {
    let specs = shared::load_catalog(config, args.catalog.as_deref())?;
    let registry = shared::build_registry(config, specs)?;
    let (context, audit) = shared::open_stores(config, args.memory)?;
    let dispatcher = Arc::new(shared::build_dispatcher(config, registry, context, audit));

    let transport = args.transport.unwrap_or(config.server.transport);
    let listen = args.listen.as_deref().unwrap_or(&config.server.listen);
    let max_frame_bytes = config.server.max_frame_bytes;
    tracing::info!(
        tools = dispatcher.registry().len(),
        ?transport,
        "toolgate starting"
    );

    match transport {
        TransportKind::Tcp => {
            let server = TcpServer::bind(listen, dispatcher, max_frame_bytes).await?;
            tokio::select! {
                _ = server.run() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                }
            }
        }
        TransportKind::Ws => {
            let server = WsServer::bind(listen, dispatcher, max_frame_bytes).await?;
            tokio::select! {
                result = server.run() => {
                    result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                }
            }
        }
        TransportKind::Stdio => {
            tokio::select! {
                summary = serve_stdio(dispatcher, max_frame_bytes) => {
                    tracing::info!(requests = summary.requests, reason = %summary.reason, "stdio closed");
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                }
            }
        }
    }

    Ok(())
}
