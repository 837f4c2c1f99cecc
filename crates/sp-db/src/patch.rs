//! Patch set model and discovery
//!
//! A patch set maps patch numbers to patch sources: raw SQL files found in
//! a patches directory, or programmatic patches registered by the host.

use crate::error::DbResult;
use crate::traits::Database;
use async_trait::async_trait;
use sp_core::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A patch that computes its statements against the live database.
///
/// This is the explicit replacement for script-file patches: the host
/// registers an implementation on a [`PatchSet`] and the engine invokes it
/// with the database handle to obtain the ordered statement batch.
#[async_trait]
pub trait ProgrammaticPatch: Send + Sync {
    /// Name recorded in the bookmark and in failure reports.
    fn name(&self) -> &str;

    /// Produce the ordered statement batch for this patch.
    async fn statements(&self, db: &dyn Database) -> DbResult<Vec<String>>;
}

/// One unit in a patch set.
#[derive(Clone)]
pub enum PatchSource {
    /// Raw SQL file, split into statements by the engine
    SqlFile(PathBuf),

    /// Host-registered programmatic patch
    Program(Arc<dyn ProgrammaticPatch>),
}

impl PatchSource {
    /// Name recorded in the bookmark and in failure reports.
    pub fn name(&self) -> String {
        match self {
            PatchSource::SqlFile(path) => basename(path),
            PatchSource::Program(patch) => patch.name().to_string(),
        }
    }
}

impl fmt::Debug for PatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchSource::SqlFile(path) => f.debug_tuple("SqlFile").field(path).finish(),
            PatchSource::Program(patch) => f.debug_tuple("Program").field(&patch.name()).finish(),
        }
    }
}

/// Ordered mapping of patch number to patch source.
///
/// Numbers are unique within a set; they need not be contiguous, and gaps
/// are simply skipped over by the engine.
#[derive(Debug, Clone, Default)]
pub struct PatchSet {
    patches: BTreeMap<u64, PatchSource>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a patch under `number`, replacing any previous entry.
    pub fn insert(&mut self, number: u64, source: PatchSource) {
        self.patches.insert(number, source);
    }

    /// Register a raw SQL file under `number`.
    pub fn insert_sql(&mut self, number: u64, path: impl Into<PathBuf>) {
        self.insert(number, PatchSource::SqlFile(path.into()));
    }

    /// Register a programmatic patch under `number`.
    pub fn insert_program(&mut self, number: u64, patch: Arc<dyn ProgrammaticPatch>) {
        self.insert(number, PatchSource::Program(patch));
    }

    /// Entries in ascending patch-number order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &PatchSource)> {
        self.patches.iter().map(|(number, source)| (*number, source))
    }

    /// Highest patch number in the set, or `None` when empty.
    pub fn max_number(&self) -> Option<u64> {
        self.patches.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

/// Parse the patch number out of a file name.
///
/// The number is the substring before the first `_` and must parse as a
/// non-negative integer: `007_add_index.sql` → 7.
pub fn patch_number(file_name: &str) -> Option<u64> {
    let (number, _) = file_name.split_once('_')?;
    number.parse().ok()
}

/// Build a patch set from the `.sql` files in a directory.
///
/// Files without a numeric `NUMBER_` prefix, and files with another
/// extension, are skipped. A duplicate number keeps the entry read last
/// and logs a warning.
pub fn discover_patches(dir: &Path) -> CoreResult<PatchSet> {
    let entries = fs::read_dir(dir).map_err(|source| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source,
    })?;

    let mut set = PatchSet::new();
    for entry in entries {
        let entry = entry.map_err(|source| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(number) = patch_number(file_name) else {
            continue;
        };
        if set.patches.contains_key(&number) {
            log::warn!("duplicate patch number {number}: keeping {file_name}");
        }
        set.insert_sql(number, path);
    }
    Ok(set)
}

/// File name of `path`, for bookmark records and failure reports.
pub(crate) fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "patch_test.rs"]
mod tests;
