//! In-process store adapters.
//!
//! Used by tests and by `toolgate serve --memory`. Both types guard
//! their state with a mutex and are safe to share across connections.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::audit::{AuditRecord, AuditSink};
use crate::context::{namespaced_key, ContextStore, DEFAULT_CONTEXT_NAMESPACE};
use crate::error::StoreError;

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Storage {
        message: e.to_string(),
    }
}

/// Context store backed by a `HashMap`.
#[derive(Debug)]
pub struct MemoryContextStore {
    namespace: String,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryContextStore {
    /// Creates an empty store using the default namespace.
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_CONTEXT_NAMESPACE)
    }

    /// Creates an empty store using `namespace`.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryContextStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContextStore for MemoryContextStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(poisoned)?;
        Ok(entries.get(&namespaced_key(&self.namespace, key)).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(poisoned)?;
        entries.insert(namespaced_key(&self.namespace, key), value.to_string());
        Ok(())
    }
}

/// Audit sink that keeps records in a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the appended records, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of appended records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn append(&self, record: &AuditRecord) -> Result<(), StoreError> {
        self.records.lock().map_err(poisoned)?.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[tokio::test]
    async fn missing_key_is_absent() {
        let store = MemoryContextStore::new();
        assert_eq!(store.get("nope").await.expect("get"), None);
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let a = MemoryContextStore::with_namespace("a");
        a.set("k", "v").await.expect("set");
        let entries = a.entries.lock().expect("lock");
        assert!(entries.contains_key("a:k"));
    }

    #[tokio::test]
    async fn audit_sink_appends_in_order() {
        let sink = MemoryAuditSink::new();
        sink.append(&AuditRecord::new("a", "{}", "{}")).await.expect("a");
        sink.append(&AuditRecord::new("b", "{}", "{}")).await.expect("b");
        let methods: Vec<_> = sink.records().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, ["a", "b"]);
    }

    proptest! {
        #[test]
        fn set_then_get_returns_value(key in ".{0,32}", value in ".*", repeats in 1usize..4) {
            let rt = tokio::runtime::Builder::new_current_thread().build().expect("rt");
            rt.block_on(async {
                let store = MemoryContextStore::new();
                for _ in 0..repeats {
                    store.set(&key, &value).await.expect("set");
                    prop_assert_eq!(store.get(&key).await.expect("get"), Some(value.clone()));
                }
                Ok(())
            })?;
        }
    }
}
