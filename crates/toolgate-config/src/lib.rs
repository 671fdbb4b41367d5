//! # toolgate-config
//!
//! Configuration management for toolgate.
//! Supports layered config: defaults -> file -> env vars, plus the
//! TOML tool catalog.

pub mod catalog;
pub mod loader;
pub mod schema;

pub use catalog::{parse_catalog, parse_catalog_file, CatalogError};
pub use loader::{load_config, ConfigError};
pub use schema::{GateConfig, TransportKind};
