//! Shared fixtures for dispatcher tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use toolgate_rbac::{PolicyAuthorizer, RbacPolicy};
use toolgate_registry::{
    handler_fn, AuditRecord, AuditSink, ContextStore, MemoryAuditSink, MemoryContextStore,
    StoreError, ToolRegistry,
};
use toolgate_rpc::Dispatcher;
use toolgate_types::{GateError, Role, ToolName, ToolSpec};

pub fn spec(name: &str, role: &str) -> ToolSpec {
    ToolSpec::new(
        ToolName::new(name).expect("valid tool name"),
        format!("{name} tool"),
        Role::new(role),
    )
}

/// Registry with `echo`, `restart`, `fail`, `panic` and `slow`, all
/// requiring the `reader` role.
pub fn registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(
        spec("echo", "reader"),
        handler_fn(|args| async move { Ok(Value::Object(args)) }),
    );
    registry.register(
        spec("restart", "reader"),
        handler_fn(|_| async { Ok(json!("restarted")) }),
    );
    registry.register(
        spec("fail", "reader"),
        handler_fn(|_| async { Err(GateError::internal("disk on fire")) }),
    );
    registry.register(
        spec("panic", "reader"),
        handler_fn(|args| async move {
            if args.is_empty() {
                panic!("handler bug");
            }
            Ok(Value::Null)
        }),
    );
    registry.register(
        spec("slow", "reader"),
        handler_fn(|_| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(json!("late"))
        }),
    );
    registry
}

/// Readers may call everything except `restart`, which is both allowed and
/// denied so the deny set has to win. Operators may call `restart`.
pub fn policy() -> RbacPolicy {
    RbacPolicy::new()
        .allow("reader", ["echo", "fail", "panic", "slow", "restart"])
        .deny("reader", ["restart"])
        .allow("operator", ["restart"])
}

pub struct Harness {
    pub dispatcher: Arc<Dispatcher>,
    pub audit: Arc<MemoryAuditSink>,
    pub context: Arc<MemoryContextStore>,
}

pub fn harness_with(registry: ToolRegistry, policy: RbacPolicy) -> Harness {
    let audit = Arc::new(MemoryAuditSink::new());
    let context = Arc::new(MemoryContextStore::new());
    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        Arc::new(PolicyAuthorizer::new(policy)),
        context.clone(),
        audit.clone(),
    )
    .with_tool_timeout(Some(Duration::from_millis(200)));
    Harness {
        dispatcher: Arc::new(dispatcher),
        audit,
        context,
    }
}

pub fn harness() -> Harness {
    harness_with(registry(), policy())
}

/// Audit sink that always fails.
pub struct BrokenAuditSink;

#[async_trait]
impl AuditSink for BrokenAuditSink {
    async fn append(&self, _record: &AuditRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable {
            message: "audit db offline".into(),
        })
    }
}

/// Context store that always fails.
pub struct BrokenContextStore;

#[async_trait]
impl ContextStore for BrokenContextStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable {
            message: "cache offline".into(),
        })
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable {
            message: "cache offline".into(),
        })
    }
}
