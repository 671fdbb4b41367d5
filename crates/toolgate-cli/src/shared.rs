//! Shared helpers used across CLI commands.
//!
//! Centralises catalog loading, handler binding and store setup so
//! `serve`, `tools` and `check` see the same registry.

use std::path::Path;
use std::sync::Arc;

use toolgate_config::{parse_catalog_file, GateConfig};
use toolgate_rbac::PolicyAuthorizer;
use toolgate_registry::{
    AuditSink, ContextStore, MemoryAuditSink, MemoryContextStore, ToolRegistry,
};
use toolgate_rpc::Dispatcher;
use toolgate_store_sqlite::{SqliteAuditSink, SqliteContextStore};
use toolgate_types::ToolSpec;

use crate::builtins::Builtins;

/// Loads the catalog named on the command line, or `catalog.path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog(config: &GateConfig, path: Option<&str>) -> anyhow::Result<Vec<ToolSpec>> {
    let path = path.unwrap_or(&config.catalog.path);
    parse_catalog_file(Path::new(path)).map_err(|e| anyhow::anyhow!("catalog error: {e}"))
}

/// Binds every catalog entry to its builtin handler.
///
/// # Errors
///
/// Returns an error naming the first tool without a handler.
pub fn build_registry(config: &GateConfig, specs: Vec<ToolSpec>) -> anyhow::Result<ToolRegistry> {
    let builtins = Builtins::new(&config.builtins.log_path);
    ToolRegistry::from_catalog(specs, |spec| builtins.resolve(spec))
        .map_err(|e| anyhow::anyhow!("registry error: {e}"))
}

/// Opens the context store and audit sink, in memory or SQLite-backed.
///
/// # Errors
///
/// Returns an error if a database file cannot be created or opened.
pub fn open_stores(
    config: &GateConfig,
    memory: bool,
) -> anyhow::Result<(Arc<dyn ContextStore>, Arc<dyn AuditSink>)> {
    let namespace = config.storage.context_namespace.clone();
    if memory {
        tracing::warn!("using in-memory stores; audit records will not persist");
        return Ok((
            Arc::new(MemoryContextStore::with_namespace(namespace)),
            Arc::new(MemoryAuditSink::new()),
        ));
    }

    let context = SqliteContextStore::open(&config.storage.context_db)
        .map_err(|e| anyhow::anyhow!("context store error: {e}"))?
        .with_namespace(namespace);
    let audit = SqliteAuditSink::open(&config.storage.audit_db)
        .map_err(|e| anyhow::anyhow!("audit store error: {e}"))?;
    Ok((Arc::new(context), Arc::new(audit)))
}

/// Wires a dispatcher from config, registry and stores.
pub fn build_dispatcher(
    config: &GateConfig,
    registry: ToolRegistry,
    context: Arc<dyn ContextStore>,
    audit: Arc<dyn AuditSink>,
) -> Dispatcher {
    Dispatcher::new(
        Arc::new(registry),
        Arc::new(PolicyAuthorizer::new(config.policy.clone())),
        context,
        audit,
    )
    .with_tool_timeout(config.dispatch.tool_timeout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolgate_types::{Role, ToolName};

    fn spec(name: &str) -> ToolSpec {
        ToolSpec::new(ToolName::new(name).expect("name"), "", Role::new("reader"))
    }

    #[test]
    fn builtin_catalog_binds() {
        let config = GateConfig::default();
        let registry =
            build_registry(&config, vec![spec("echo"), spec("runbook.preview")]).expect("bind");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_tool_fails_to_bind() {
        let config = GateConfig::default();
        let err = build_registry(&config, vec![spec("k8s.list_pods")]).expect_err("unbound");
        assert!(err.to_string().contains("k8s.list_pods"));
    }

    #[test]
    fn open_sqlite_stores_in_temp_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = GateConfig::default();
        config.storage.audit_db = dir.path().join("audit.db").display().to_string();
        config.storage.context_db = dir.path().join("ctx.db").display().to_string();
        assert!(open_stores(&config, false).is_ok());
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let config = GateConfig::default();
        let err = load_catalog(&config, Some("/nonexistent/tools.toml")).expect_err("missing");
        assert!(err.to_string().contains("catalog error"));
    }
}
