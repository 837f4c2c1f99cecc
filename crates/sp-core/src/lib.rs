//! sp-core - Core library for sqlpatch
//!
//! This crate provides the pieces of sqlpatch that never touch a database:
//! configuration parsing, the raw-SQL statement splitter, and the
//! applied-patch registry (bookmark) persisted per schema.

pub mod config;
pub mod error;
pub mod registry;
pub mod splitter;

pub use config::{Config, Defaults, SchemaConfig};
pub use error::{CoreError, CoreResult};
pub use registry::{bookmark_path, PatchRecord, Registry};
pub use splitter::split_statements;
