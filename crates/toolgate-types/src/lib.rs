//! # toolgate-types
//!
//! Domain types for the toolgate dispatcher.
//! This crate contains pure data types with no I/O and no async code
//! (serde and thiserror are the only external dependencies).

pub mod error;
pub mod tool;

// Re-exports for convenience.
pub use error::GateError;
pub use tool::{Role, ToolName, ToolSpec};
