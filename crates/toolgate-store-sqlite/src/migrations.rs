//! Database schema migrations.

use rusqlite::Connection;
use toolgate_registry::StoreError;

/// Current schema version.
const SCHEMA_VERSION: u32 = 2;

/// Runs all pending migrations on the database.
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    let current = get_schema_version(conn)?;

    if current < 1 {
        migrate_v1(conn)?;
    }
    if current < 2 {
        migrate_v2(conn)?;
    }

    if current < SCHEMA_VERSION {
        tracing::debug!(from = current, to = SCHEMA_VERSION, "schema migrated");
        set_schema_version(conn, SCHEMA_VERSION)?;
    }
    Ok(())
}

/// Creates the audit log table (v1).
fn migrate_v1(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS audit_logs (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            method        TEXT NOT NULL,
            request_json  TEXT NOT NULL,
            response_json TEXT NOT NULL,
            timestamp_ms  INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_audit_method ON audit_logs(method);",
    )
    .map_err(|e| StoreError::Storage {
        message: format!("migration v1 failed: {e}"),
    })
}

/// Creates the context entry table (v2).
fn migrate_v2(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS context_entries (
            namespace  TEXT NOT NULL,
            key        TEXT NOT NULL,
            value      TEXT NOT NULL,
            updated_ms INTEGER NOT NULL,
            PRIMARY KEY (namespace, key)
        );",
    )
    .map_err(|e| StoreError::Storage {
        message: format!("migration v2 failed: {e}"),
    })
}

/// Reads the current schema version from PRAGMA user_version.
fn get_schema_version(conn: &Connection) -> Result<u32, StoreError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StoreError::Storage {
            message: format!("failed to read schema version: {e}"),
        })
}

/// Sets the schema version via PRAGMA user_version.
fn set_schema_version(conn: &Connection, version: u32) -> Result<(), StoreError> {
    conn.pragma_update(None, "user_version", version)
        .map_err(|e| StoreError::Storage {
            message: format!("failed to set schema version: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_run_on_fresh_db() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        run_migrations(&conn).expect("migrations should succeed");

        let version = get_schema_version(&conn).expect("version");
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        run_migrations(&conn).expect("first run");
        run_migrations(&conn).expect("second run should also succeed");
    }

    #[test]
    fn both_tables_exist() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        run_migrations(&conn).expect("migrate");
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('audit_logs', 'context_entries')",
                [],
                |row| row.get(0),
            )
            .expect("query");
        assert_eq!(count, 2);
    }
}
