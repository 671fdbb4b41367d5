//! Connection helpers shared by the adapters.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;
use toolgate_registry::StoreError;

use crate::migrations::run_migrations;

/// How long a writer waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Maps a `rusqlite::Error` to a `StoreError::Storage`.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> StoreError {
    StoreError::Storage {
        message: e.to_string(),
    }
}

/// Opens (or creates) a database file and brings its schema up to date.
pub(crate) fn open_path(path: &str) -> Result<Mutex<Connection>, StoreError> {
    let conn = Connection::open(path).map_err(|e| StoreError::Unavailable {
        message: format!("cannot open '{path}': {e}"),
    })?;
    conn.busy_timeout(BUSY_TIMEOUT).map_err(map_sqlite_err)?;
    run_migrations(&conn)?;
    Ok(Mutex::new(conn))
}

/// Opens a private in-memory database with the current schema.
pub(crate) fn open_memory() -> Result<Mutex<Connection>, StoreError> {
    let conn = Connection::open_in_memory().map_err(map_sqlite_err)?;
    run_migrations(&conn)?;
    Ok(Mutex::new(conn))
}

/// Locks the connection, mapping poisoning to a storage error.
pub(crate) fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, StoreError> {
    conn.lock().map_err(|e| StoreError::Storage {
        message: e.to_string(),
    })
}
