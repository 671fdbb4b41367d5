//! SQLite implementation of `AuditSink`.

use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection};
use toolgate_registry::{AuditRecord, AuditSink, StoreError};

use crate::connection::{lock, map_sqlite_err, open_memory, open_path};

/// An audit record as read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAuditRecord {
    /// Row id (monotonic insertion order).
    pub id: i64,
    /// The stored record.
    pub record: AuditRecord,
}

/// Append-only audit log in the `audit_logs` table.
///
/// Records are only ever inserted; this type exposes no update or
/// delete operation.
pub struct SqliteAuditSink {
    conn: Mutex<Connection>,
}

impl SqliteAuditSink {
    /// Opens or creates the audit database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the file cannot be opened and
    /// `StoreError::Storage` if migrations fail.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_path(path)?,
        })
    }

    /// Opens a private in-memory audit database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_memory()?,
        })
    }

    /// Returns up to `limit` most recent records, newest first,
    /// optionally restricted to one method name.
    pub fn recent(
        &self,
        limit: u32,
        method: Option<&str>,
    ) -> Result<Vec<StoredAuditRecord>, StoreError> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn
            .prepare(
                "SELECT id, method, request_json, response_json, timestamp_ms \
                 FROM audit_logs WHERE (?1 IS NULL OR method = ?1) \
                 ORDER BY id DESC LIMIT ?2",
            )
            .map_err(map_sqlite_err)?;
        let rows = stmt
            .query_map(params![method, limit], row_to_record)
            .map_err(map_sqlite_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlite_err)?;
        Ok(rows)
    }

    /// Total number of stored records.
    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = lock(&self.conn)?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM audit_logs", [], |row| row.get(0))
            .map_err(map_sqlite_err)?;
        Ok(n as u64)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredAuditRecord> {
    let timestamp_ms: i64 = row.get(4)?;
    Ok(StoredAuditRecord {
        id: row.get(0)?,
        record: AuditRecord {
            method: row.get(1)?,
            request: row.get(2)?,
            response: row.get(3)?,
            timestamp_ms: timestamp_ms as u64,
        },
    })
}

#[async_trait]
impl AuditSink for SqliteAuditSink {
    async fn append(&self, record: &AuditRecord) -> Result<(), StoreError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO audit_logs (method, request_json, response_json, timestamp_ms) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.method,
                record.request,
                record.response,
                record.timestamp_ms as i64,
            ],
        )
        .map_err(map_sqlite_err)?;
        Ok(())
    }
}
