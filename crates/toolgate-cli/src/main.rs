//! toolgate CLI - JSON-RPC tool gateway.

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;

mod builtins;
mod commands;
mod output;
pub(crate) mod shared;

/// toolgate - role-checked, audited tool gateway over JSON-RPC.
#[derive(Debug, Parser)]
#[command(name = "toolgate", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv). Overrides `logging.level`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the gateway over tcp, ws or stdio.
    Serve(commands::serve::ServeArgs),
    /// List catalog tools with their role and policy decision.
    Tools(commands::tools::ToolsArgs),
    /// Validate config, catalog, policy and handler bindings.
    Check(commands::check::CheckArgs),
    /// Show recent audit records.
    Audit(commands::audit::AuditArgs),
    /// Send one request to a running tcp gateway.
    Call(commands::call::CallArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = toolgate_config::load_config(cli.config.as_deref())?;

    // Logs go to stderr: stdout carries frames in stdio mode.
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    };

    tracing::debug!("toolgate starting with config: {:?}", cli.config);

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Tools(args) => commands::tools::execute(args, &config),
        Commands::Check(args) => commands::check::execute(args, &config),
        Commands::Audit(args) => commands::audit::execute(args, &config),
        Commands::Call(args) => commands::call::execute(args, &config).await,
    }
}
