//! Integration tests for toolgate-config schema types.

use std::time::Duration;

use toolgate_config::schema::{DispatchConfig, GateConfig, TransportKind};

#[test]
fn gate_config_default_values() {
    let config = GateConfig::default();
    assert_eq!(config.server.transport, TransportKind::Tcp);
    assert_eq!(config.server.listen, "127.0.0.1:9000");
    assert_eq!(config.server.max_frame_bytes, 1024 * 1024);
    assert_eq!(config.dispatch.tool_timeout_ms, 30_000);
    assert_eq!(config.catalog.path, "tools.toml");
    assert_eq!(config.storage.context_namespace, "ctx");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.builtins.log_path, "/var/log/syslog");
    assert!(config.policy.is_empty());
}

#[test]
fn gate_config_serde_roundtrip() {
    let config = GateConfig::default();
    let json = serde_json::to_string(&config).expect("serialize");
    let back: GateConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.server.listen, config.server.listen);
    assert_eq!(back.storage.audit_db, config.storage.audit_db);
}

#[test]
fn tool_timeout_zero_disables() {
    let d = DispatchConfig { tool_timeout_ms: 0 };
    assert_eq!(d.tool_timeout(), None);
    let d = DispatchConfig { tool_timeout_ms: 1500 };
    assert_eq!(d.tool_timeout(), Some(Duration::from_millis(1500)));
}

#[test]
fn transport_kind_parses() {
    assert_eq!("ws".parse::<TransportKind>().expect("ws"), TransportKind::Ws);
    assert_eq!(
        "stdio".parse::<TransportKind>().expect("stdio"),
        TransportKind::Stdio
    );
    assert!("udp".parse::<TransportKind>().is_err());
}

#[test]
fn policy_section_deserializes() {
    let config: GateConfig = toml::from_str(
        r#"
        [policy.operator]
        allow = ["runbook.execute", "restart"]
        deny = ["restart"]
        "#,
    )
    .expect("parse");
    let operator = config.policy.role("operator").expect("role");
    assert!(operator.permits("runbook.execute"));
    assert!(!operator.permits("restart"));
}
