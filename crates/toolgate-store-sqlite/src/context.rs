//! SQLite implementation of `ContextStore`.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use toolgate_registry::{ContextStore, StoreError, DEFAULT_CONTEXT_NAMESPACE};

use crate::connection::{lock, map_sqlite_err, open_memory, open_path};

/// Context cache in the `context_entries` table, scoped to one namespace.
pub struct SqliteContextStore {
    conn: Mutex<Connection>,
    namespace: String,
}

impl SqliteContextStore {
    /// Opens or creates the context database at `path` using the
    /// default namespace.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_path(path)?,
            namespace: DEFAULT_CONTEXT_NAMESPACE.to_string(),
        })
    }

    /// Opens a private in-memory context database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_memory()?,
            namespace: DEFAULT_CONTEXT_NAMESPACE.to_string(),
        })
    }

    /// Scopes the store to `namespace`.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

#[async_trait]
impl ContextStore for SqliteContextStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = lock(&self.conn)?;
        conn.query_row(
            "SELECT value FROM context_entries WHERE namespace = ?1 AND key = ?2",
            params![self.namespace, key],
            |row| row.get(0),
        )
        .optional()
        .map_err(map_sqlite_err)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO context_entries (namespace, key, value, updated_ms) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT(namespace, key) DO UPDATE SET \
             value = excluded.value, updated_ms = excluded.updated_ms",
            params![self.namespace, key, value, now_ms],
        )
        .map_err(map_sqlite_err)?;
        Ok(())
    }
}
