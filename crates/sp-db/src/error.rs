//! Error types for sp-db

use thiserror::Error;

/// Database and engine errors
#[derive(Error, Debug)]
pub enum DbError {
    /// D001: Connection could not be established or has been released
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// D002: A statement could not be executed
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// D003: Transaction management failed
    #[error("[D003] Transaction failed: {0}")]
    TransactionError(String),

    /// D004: The init schema failed, so no bookmark was created
    #[error("[D004] Initial schema '{name}' failed; the bookmark was not created")]
    BootstrapFailed { name: String },

    /// D005: A programmatic patch did not produce a statement sequence
    #[error("[D005] Programmatic patch '{name}' did not produce statements: {message}")]
    ProgramFailed { name: String, message: String },

    /// Core error (config, registry, IO) surfaced through the engine
    #[error(transparent)]
    Core(#[from] sp_core::CoreError),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
