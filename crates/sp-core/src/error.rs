//! Error types for sp-core

use thiserror::Error;

/// Core error type for sqlpatch
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Schema section missing from the config file
    #[error("[C004] Could not find schema section '{name}' in config")]
    SchemaNotFound { name: String },

    /// R001: Bookmark file exists but cannot be read or decoded
    #[error("[R001] Unable to read bookmark file '{path}': {message}")]
    RegistryUnreadable { path: String, message: String },

    /// R002: Applied patches cannot be determined
    #[error("[R002] Can't detect applied patches! Check '{path}'")]
    RegistryUndetermined { path: String },

    /// I001: IO error
    #[error("[I001] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// I002: IO error with file path context
    #[error("[I002] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
