//! Transactional batch executor
//!
//! Runs one ordered batch of statements (one patch file, or one ad-hoc
//! query) inside a single transaction and reports stats for it. One
//! transaction spans exactly one batch; there are no nested transactions
//! and no transaction spanning multiple patches.

use crate::error::DbResult;
use crate::traits::Database;
use std::time::Instant;

/// Hook invoked once per statement before it executes, with the 1-based
/// statement index. Observability only, never part of the execution
/// contract.
pub type StatementHook = dyn Fn(usize, &str) + Send + Sync;

/// Result of one transactional batch.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    /// Statements attempted, including one that failed
    pub count: usize,

    /// Accumulated affected rows; negative driver sentinels are skipped
    pub affected_rows: u64,

    /// 1 after a rolled-back hard failure, otherwise accumulated driver
    /// warnings
    pub error_count: u64,

    /// Wall-clock duration of the whole batch
    pub elapsed_seconds: f64,
}

impl ExecutionStats {
    /// Whether the batch committed without failures or warnings.
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }
}

/// Execute `statements` as one transaction against `db`.
///
/// The first statement the driver rejects stops the batch: the transaction
/// is rolled back and the stats come back with `error_count == 1`.
/// Transaction management failures (begin/commit/rollback) propagate as
/// errors instead.
pub async fn execute_batch(
    db: &dyn Database,
    statements: &[String],
    hook: Option<&StatementHook>,
) -> DbResult<ExecutionStats> {
    let start = Instant::now();
    let mut stats = ExecutionStats::default();

    db.begin().await?;
    for (index, statement) in statements.iter().enumerate() {
        if let Some(hook) = hook {
            hook(index + 1, statement);
        }
        stats.count += 1;

        match db.execute(statement).await {
            Ok(affected) => {
                if affected > 0 {
                    stats.affected_rows += affected as u64;
                }
                stats.error_count += db.warning_count().await?;
            }
            Err(e) => {
                log::warn!("statement {} failed, rolling back batch: {e}", index + 1);
                db.rollback().await?;
                stats.error_count = 1;
                stats.elapsed_seconds = start.elapsed().as_secs_f64();
                return Ok(stats);
            }
        }
    }
    db.commit().await?;

    stats.elapsed_seconds = start.elapsed().as_secs_f64();
    Ok(stats)
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
