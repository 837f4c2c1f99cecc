//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for sqlpatch
///
/// The engine and executor only ever see this capability; the physical
/// driver lives behind it. Implementations must be Send + Sync.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single SQL statement.
    ///
    /// Returns the driver-reported affected-row count. A negative value
    /// means the count is not meaningful for this statement (read-style
    /// statements); callers must not treat it as an error.
    async fn execute(&self, sql: &str) -> DbResult<i64>;

    /// Warnings the driver reported for the most recent statement.
    ///
    /// Drivers that cannot report warnings return 0.
    async fn warning_count(&self) -> DbResult<u64> {
        Ok(0)
    }

    /// Open a transaction.
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction.
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction.
    async fn rollback(&self) -> DbResult<()>;

    /// Release the underlying connection; every later call fails.
    async fn close(&self) -> DbResult<()>;

    /// Backend identifier for logging
    fn db_type(&self) -> &'static str;
}
