//! Builtin tool handlers, bound to catalog entries by name.
//!
//! None of these touch a cluster: runbooks are previewed and approved,
//! never executed.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use toolgate_registry::{handler_fn, ToolHandler};
use toolgate_types::{GateError, ToolSpec};

pub const ECHO: &str = "echo";
pub const LOGS_SEARCH: &str = "logs.search";
pub const RUNBOOK_PREVIEW: &str = "runbook.preview";
pub const RUNBOOK_EXECUTE: &str = "runbook.execute";

/// Every name [`Builtins::resolve`] can bind.
pub const NAMES: &[&str] = &[ECHO, LOGS_SEARCH, RUNBOOK_PREVIEW, RUNBOOK_EXECUTE];

const DEFAULT_MAX_LINES: u64 = 50;

/// Handler factory for the bundled tools.
pub struct Builtins {
    log_path: Arc<str>,
}

impl Builtins {
    pub fn new(log_path: &str) -> Self {
        Self {
            log_path: Arc::from(log_path),
        }
    }

    /// Returns the handler for `spec`, or `None` if no builtin has that name.
    pub fn resolve(&self, spec: &ToolSpec) -> Option<Arc<dyn ToolHandler>> {
        let handler = match spec.name.as_str() {
            ECHO => handler_fn(|args| async move { Ok(Value::Object(args)) }),
            LOGS_SEARCH => {
                let path = Arc::clone(&self.log_path);
                handler_fn(move |args| logs_search(Arc::clone(&path), args))
            }
            RUNBOOK_PREVIEW => handler_fn(runbook_preview),
            RUNBOOK_EXECUTE => handler_fn(runbook_execute),
            _ => return None,
        };
        Some(handler)
    }
}

fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, GateError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| GateError::invalid_input(format!("missing string argument '{key}'")))
}

fn runbook_steps(id: &str) -> Option<&'static [&'static str]> {
    match id {
        "restart-api" => Some(&[
            "kubectl rollout restart deployment api-service",
            "kubectl get pods -l app=api-service",
        ]),
        _ => None,
    }
}

/// Lines of the configured log file containing `term`, in file order.
/// A missing file yields `[]`.
async fn logs_search(path: Arc<str>, args: Map<String, Value>) -> Result<Value, GateError> {
    let term = required_str(&args, "term")?;
    let max_lines = match args.get("max_lines") {
        None => DEFAULT_MAX_LINES,
        Some(v) => v.as_u64().ok_or_else(|| {
            GateError::invalid_input("'max_lines' must be a non-negative integer")
        })?,
    };

    let file = match tokio::fs::File::open(&*path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(json!([])),
        Err(e) => return Err(GateError::internal(format!("cannot read '{path}': {e}"))),
    };

    // Stream the file; stop reading once enough matches are collected.
    let mut lines = BufReader::new(file).split(b'\n');
    let mut matches = Vec::new();
    while (matches.len() as u64) < max_lines {
        let raw = match lines.next_segment().await {
            Ok(Some(raw)) => raw,
            Ok(None) => break,
            Err(e) => return Err(GateError::internal(format!("cannot read '{path}': {e}"))),
        };
        let line = String::from_utf8_lossy(&raw);
        if line.contains(term) {
            matches.push(Value::String(line.trim().to_string()));
        }
    }
    Ok(Value::Array(matches))
}

async fn runbook_preview(args: Map<String, Value>) -> Result<Value, GateError> {
    let id = required_str(&args, "runbook_id")?;
    let steps = runbook_steps(id)
        .ok_or_else(|| GateError::not_found(format!("unknown runbook '{id}'")))?;
    Ok(json!({"runbook": id, "steps": steps}))
}

async fn runbook_execute(args: Map<String, Value>) -> Result<Value, GateError> {
    let id = required_str(&args, "runbook_id")?;
    let approver = args
        .get("approved_by")
        .and_then(Value::as_str)
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| {
            GateError::permission_denied("runbook execution requires human approval")
        })?;
    let steps = runbook_steps(id)
        .ok_or_else(|| GateError::not_found(format!("unknown runbook '{id}'")))?;

    tracing::info!(runbook = id, approved_by = approver, "runbook approved (not executed)");
    Ok(json!({
        "status": "approved",
        "executed_steps": steps,
        "approved_by": approver,
    }))
}
