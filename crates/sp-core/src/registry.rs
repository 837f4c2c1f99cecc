//! Applied-patch registry (bookmark)
//!
//! One JSON bookmark file per schema records which patch numbers have been
//! applied. An absent file means the schema was never bootstrapped, which is
//! a different state from a bookmark holding an empty array.
//!
//! The bookmark is rewritten in full after every successful patch and the
//! write is not atomic, so a crash mid-write can corrupt it. The engine
//! assumes exclusive ownership of a schema's bookmark for the duration of a
//! run; concurrent runs against the same schema can race on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// One applied patch, as stored in the bookmark file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchRecord {
    /// Patch number, unique within a schema
    pub number: u64,

    /// File name the patch was applied from
    pub name: String,

    /// When the patch was applied
    pub timestamp: DateTime<Utc>,
}

impl PatchRecord {
    /// Record `name` as applied now.
    pub fn applied_now(number: u64, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// In-memory set of applied patches for one schema.
///
/// Records are only ever added; there is no deletion path.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: BTreeMap<u64, PatchRecord>,
}

impl Registry {
    /// Load a registry from a bookmark file.
    ///
    /// Returns `Ok(None)` when the file does not exist ("never
    /// bootstrapped"). A file that exists but cannot be read or decoded as
    /// a JSON array of records is a [`CoreError::RegistryUnreadable`].
    pub fn load(path: &Path) -> CoreResult<Option<Registry>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| CoreError::RegistryUnreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let records: Vec<PatchRecord> =
            serde_json::from_str(&content).map_err(|e| CoreError::RegistryUnreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut registry = Registry::default();
        for record in records {
            registry.insert(record);
        }
        Ok(Some(registry))
    }

    /// Persist the registry, rewriting the bookmark file in full.
    ///
    /// Records are serialized as a JSON array sorted ascending by number,
    /// independent of insertion order. The parent directory is created if
    /// missing.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| CoreError::IoWithPath {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let records: Vec<&PatchRecord> = self.records.values().collect();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(path, json).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Whether a patch with `number` has been applied.
    pub fn contains(&self, number: u64) -> bool {
        self.records.contains_key(&number)
    }

    /// Insert a record, replacing any previous record with the same number.
    pub fn insert(&mut self, record: PatchRecord) {
        self.records.insert(record.number, record);
    }

    /// Number of applied patches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no patches have been applied yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending patch-number order.
    pub fn iter(&self) -> impl Iterator<Item = &PatchRecord> {
        self.records.values()
    }
}

/// Bookmark file path for `schema` under `dir`: `<dir>/<schema>.json`.
pub fn bookmark_path(dir: &Path, schema: &str) -> PathBuf {
    dir.join(format!("{schema}.json"))
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
