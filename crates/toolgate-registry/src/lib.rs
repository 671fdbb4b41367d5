//! # toolgate-registry
//!
//! The tool registry plus the port definitions (abstract traits) the
//! dispatcher consumes: tool handlers, the context store and the audit
//! sink. Adapter crates implement the store traits; `memory` holds the
//! in-process implementations.

pub mod audit;
pub mod context;
pub mod error;
pub mod handler;
pub mod memory;
pub mod registry;

pub use audit::{AuditRecord, AuditSink};
pub use context::{namespaced_key, ContextStore, DEFAULT_CONTEXT_NAMESPACE};
pub use error::{RegistryError, StoreError};
pub use handler::{handler_fn, FnHandler, ToolHandler};
pub use memory::{MemoryAuditSink, MemoryContextStore};
pub use registry::{RegisteredTool, ToolRegistry};
