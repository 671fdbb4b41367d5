//! Context store port: a narrow get/set view of an external key-value cache.

use async_trait::async_trait;

use crate::error::StoreError;

/// Namespace applied to context keys unless configured otherwise.
pub const DEFAULT_CONTEXT_NAMESPACE: &str = "ctx";

/// Builds the physical key for a context entry (`ctx:<key>`).
pub fn namespaced_key(namespace: &str, key: &str) -> String {
    format!("{namespace}:{key}")
}

/// Key-value store for cross-call state.
///
/// Values are opaque strings. Implementations must be safe for
/// concurrent use by many connections.
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
