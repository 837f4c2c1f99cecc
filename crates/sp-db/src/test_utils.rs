//! Shared test utilities for sp-db

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use std::sync::Mutex;

/// Scriptable in-memory `Database` for executor and engine tests.
///
/// Records every call in order (`BEGIN`, `COMMIT`, `ROLLBACK`, or the
/// statement text) and fails any statement containing one of the
/// configured markers.
pub(crate) struct MockDb {
    log: Mutex<Vec<String>>,
    fail_on: Vec<String>,
    affected: i64,
    warnings: u64,
}

impl MockDb {
    pub(crate) fn new() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            fail_on: Vec::new(),
            affected: 1,
            warnings: 0,
        }
    }

    /// Fail every statement whose text contains `marker`.
    pub(crate) fn failing_on(marker: &str) -> Self {
        let mut db = Self::new();
        db.fail_on.push(marker.to_string());
        db
    }

    /// Report `affected` rows for every statement.
    pub(crate) fn with_affected(mut self, affected: i64) -> Self {
        self.affected = affected;
        self
    }

    /// Report `warnings` driver warnings after every statement.
    pub(crate) fn with_warnings(mut self, warnings: u64) -> Self {
        self.warnings = warnings;
        self
    }

    /// Everything executed so far, transaction markers included.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Statements executed so far, transaction markers excluded.
    pub(crate) fn statements(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call.as_str(), "BEGIN" | "COMMIT" | "ROLLBACK"))
            .collect()
    }

    fn record(&self, call: &str) {
        self.log.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl Database for MockDb {
    async fn execute(&self, sql: &str) -> DbResult<i64> {
        if self.fail_on.iter().any(|marker| sql.contains(marker)) {
            return Err(DbError::ExecutionError(format!("forced failure: {sql}")));
        }
        self.record(sql);
        Ok(self.affected)
    }

    async fn warning_count(&self) -> DbResult<u64> {
        Ok(self.warnings)
    }

    async fn begin(&self) -> DbResult<()> {
        self.record("BEGIN");
        Ok(())
    }

    async fn commit(&self) -> DbResult<()> {
        self.record("COMMIT");
        Ok(())
    }

    async fn rollback(&self) -> DbResult<()> {
        self.record("ROLLBACK");
        Ok(())
    }

    async fn close(&self) -> DbResult<()> {
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mock"
    }
}
