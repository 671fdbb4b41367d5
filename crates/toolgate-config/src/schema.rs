//! Configuration schema types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use toolgate_rbac::RbacPolicy;

/// Top-level toolgate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Request dispatch settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Tool catalog location.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Audit and context storage.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Settings for the bundled tool handlers.
    #[serde(default)]
    pub builtins: BuiltinsConfig,
    /// Role -> allow/deny sets.
    #[serde(default)]
    pub policy: RbacPolicy,
}

/// Which transport `serve` starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Newline-delimited frames over TCP.
    #[default]
    Tcp,
    /// WebSocket text frames on `GET /mcp`.
    Ws,
    /// A single connection over stdin/stdout.
    Stdio,
}

impl std::str::FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "ws" => Ok(Self::Ws),
            "stdio" => Ok(Self::Stdio),
            other => Err(format!("unknown transport '{other}' (expected tcp, ws or stdio)")),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: TransportKind,
    /// Socket address to bind for tcp and ws.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Frames longer than this close the connection.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            listen: default_listen(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:9000".to_string()
}
fn default_max_frame_bytes() -> usize {
    1024 * 1024
}

/// Dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Handler timeout in milliseconds; `0` disables it.
    #[serde(default = "default_tool_timeout_ms")]
    pub tool_timeout_ms: u64,
}

impl DispatchConfig {
    /// Returns the timeout as a `Duration`, or `None` when disabled.
    pub fn tool_timeout(&self) -> Option<Duration> {
        (self.tool_timeout_ms > 0).then(|| Duration::from_millis(self.tool_timeout_ms))
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tool_timeout_ms: default_tool_timeout_ms(),
        }
    }
}

fn default_tool_timeout_ms() -> u64 {
    30_000
}

/// Catalog file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "tools.toml".to_string()
}

/// SQLite database paths and the context key namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_audit_db")]
    pub audit_db: String,
    #[serde(default = "default_context_db")]
    pub context_db: String,
    #[serde(default = "default_context_namespace")]
    pub context_namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            audit_db: default_audit_db(),
            context_db: default_context_db(),
            context_namespace: default_context_namespace(),
        }
    }
}

fn default_audit_db() -> String {
    "toolgate-audit.db".to_string()
}
fn default_context_db() -> String {
    "toolgate-context.db".to_string()
}
fn default_context_namespace() -> String {
    "ctx".to_string()
}

/// Bundled tool handler settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuiltinsConfig {
    /// File searched by `logs.search`. Callers cannot choose another file.
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

impl Default for BuiltinsConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

fn default_log_path() -> String {
    "/var/log/syslog".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "toolgate_rpc=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
