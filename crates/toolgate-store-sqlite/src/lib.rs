//! # toolgate-store-sqlite
//!
//! SQLite adapters for the toolgate store ports: a durable,
//! append-only `AuditSink` and a namespaced `ContextStore`.
//! Both tables live in the same schema, so one database file can back
//! both adapters.

mod connection;
pub mod audit;
pub mod context;
pub mod migrations;

pub use audit::{SqliteAuditSink, StoredAuditRecord};
pub use context::SqliteContextStore;
