//! `toolgate audit` command.

use clap::Args;

use toolgate_config::GateConfig;
use toolgate_store_sqlite::SqliteAuditSink;

/// Show recent audit records, newest first.
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Maximum number of records to show.
    #[arg(short, long, default_value = "20")]
    pub limit: u32,
    /// Only show records for this method.
    #[arg(short, long)]
    pub method: Option<String>,
}

/// Executes the audit command.
pub fn execute(args: &AuditArgs, config: &GateConfig) -> anyhow::Result<()> {
    let sink = SqliteAuditSink::open(&config.storage.audit_db)
        .map_err(|e| anyhow::anyhow!("audit store error: {e}"))?;
    let rows = sink
        .recent(args.limit, args.method.as_deref())
        .map_err(|e| anyhow::anyhow!("audit query failed: {e}"))?;

    if rows.is_empty() {
        println!("No audit records.");
        return Ok(());
    }
    for row in &rows {
        println!("#{:<6} {:>13}  {}", row.id, row.record.timestamp_ms, row.record.method);
        println!("  request:  {}", row.record.request);
        println!("  response: {}", row.record.response);
    }
    let total = sink.count().map_err(|e| anyhow::anyhow!("audit query failed: {e}"))?;
    println!("\n{} of {} record(s)", rows.len(), total);
    Ok(())
}
