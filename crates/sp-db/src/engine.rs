//! Registry-driven patch engine
//!
//! Loads the bookmark for a schema, bootstraps from an init schema when the
//! bookmark does not exist yet, applies unapplied patches in ascending
//! order (one transaction per patch), and persists the bookmark after each
//! success so partial progress survives a crash mid-run.

use crate::error::{DbError, DbResult};
use crate::executor::{execute_batch, ExecutionStats, StatementHook};
use crate::patch::{basename, PatchSet, PatchSource};
use crate::traits::Database;
use sp_core::registry::{PatchRecord, Registry};
use sp_core::splitter::split_statements;
use sp_core::CoreError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of one attempted patch.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub number: u64,
    pub name: String,
    pub stats: ExecutionStats,
}

impl PatchOutcome {
    /// Whether the patch batch committed cleanly and was recorded.
    pub fn applied(&self) -> bool {
        self.stats.is_success()
    }
}

/// Result of one [`PatchEngine::run_patch_set`] invocation.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Highest patch number in the patch set (0 for an empty set)
    pub version: u64,

    /// Stats for the bootstrap batch, when one ran
    pub bootstrap: Option<ExecutionStats>,

    /// One entry per patch attempted this run; skipped patches are absent
    pub outcomes: Vec<PatchOutcome>,
}

impl RunSummary {
    /// Patches applied this run.
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.applied()).count()
    }

    /// Names of the patches that failed this run.
    pub fn failed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.applied())
            .map(|o| o.name.as_str())
            .collect()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failed();
        if !failed.is_empty() {
            write!(
                f,
                "Your database was updated but the following patches failed: {}",
                failed.join(", ")
            )
        } else if self.applied_count() == 0 {
            write!(f, "Your database is already up-to-date. Version: {}", self.version)
        } else {
            write!(f, "Your database is now up-to-date. Version: {}", self.version)
        }
    }
}

/// Drives patch application for one schema.
///
/// Owns the database capability and the bookmark path; the caller decides
/// when to connect and when to release the connection.
pub struct PatchEngine {
    db: Arc<dyn Database>,
    bookmark: PathBuf,
    hook: Option<Box<StatementHook>>,
}

impl PatchEngine {
    pub fn new(db: Arc<dyn Database>, bookmark: impl Into<PathBuf>) -> Self {
        Self {
            db,
            bookmark: bookmark.into(),
            hook: None,
        }
    }

    /// Install a per-statement hook (verbose echo / progress output).
    pub fn with_statement_hook(mut self, hook: Box<StatementHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Execute ad-hoc SQL text as one transactional batch.
    pub async fn run_query(&self, sql: &str) -> DbResult<ExecutionStats> {
        let statements = split_statements(sql);
        execute_batch(self.db.as_ref(), &statements, self.hook.as_deref()).await
    }

    /// Execute a SQL file as one transactional batch.
    pub async fn run_file(&self, path: &Path) -> DbResult<ExecutionStats> {
        let raw = fs::read_to_string(path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;
        let statements = split_statements(&raw);
        execute_batch(self.db.as_ref(), &statements, self.hook.as_deref()).await
    }

    /// Apply every unapplied patch in `patches`, in ascending order.
    ///
    /// When no bookmark exists yet and `init_schema` is given, the init
    /// schema runs first as an atomic batch and is recorded as patch 0 only
    /// after it succeeds, so a failed bootstrap leaves the bookmark absent.
    /// Without a bookmark and without an init schema the run fails before
    /// anything executes.
    ///
    /// A patch that fails rolls back, lands on the failure list, and does
    /// not stop the run. The bookmark is persisted after every success.
    pub async fn run_patch_set(
        &self,
        patches: &PatchSet,
        init_schema: Option<&Path>,
    ) -> DbResult<RunSummary> {
        let mut summary = RunSummary {
            version: patches.max_number().unwrap_or(0),
            ..RunSummary::default()
        };

        let mut registry = Registry::load(&self.bookmark)?;

        if registry.is_none() {
            if let Some(init) = init_schema {
                let (bootstrapped, stats) = self.bootstrap(init).await?;
                summary.bootstrap = Some(stats);
                registry = Some(bootstrapped);
            }
        }

        let Some(mut registry) = registry else {
            return Err(CoreError::RegistryUndetermined {
                path: self.bookmark.display().to_string(),
            }
            .into());
        };

        for (number, source) in patches.iter() {
            if registry.contains(number) {
                continue;
            }

            let name = source.name();
            log::info!("applying patch {number}/{version} [{name}]", version = summary.version);

            let stats = self.apply(source).await?;
            if stats.is_success() {
                registry.insert(PatchRecord::applied_now(number, name.clone()));
                registry.save(&self.bookmark)?;
            } else {
                log::warn!("patch {number} [{name}] failed and was rolled back");
            }
            summary.outcomes.push(PatchOutcome { number, name, stats });
        }

        Ok(summary)
    }

    /// Execute the init schema and record it as patch 0 on success.
    async fn bootstrap(&self, init_schema: &Path) -> DbResult<(Registry, ExecutionStats)> {
        let name = basename(init_schema);
        log::info!("creating initial schema using {}", init_schema.display());

        let stats = self.run_file(init_schema).await?;
        if !stats.is_success() {
            return Err(DbError::BootstrapFailed { name });
        }

        let mut registry = Registry::default();
        registry.insert(PatchRecord::applied_now(0, name));
        registry.save(&self.bookmark)?;
        Ok((registry, stats))
    }

    /// Run one patch source as a transactional batch.
    async fn apply(&self, source: &PatchSource) -> DbResult<ExecutionStats> {
        match source {
            PatchSource::SqlFile(path) => self.run_file(path).await,
            PatchSource::Program(patch) => {
                let statements =
                    patch
                        .statements(self.db.as_ref())
                        .await
                        .map_err(|e| DbError::ProgramFailed {
                            name: patch.name().to_string(),
                            message: e.to_string(),
                        })?;
                execute_batch(self.db.as_ref(), &statements, self.hook.as_deref()).await
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
