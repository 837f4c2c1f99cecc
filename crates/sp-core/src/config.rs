//! Configuration types and parsing for sqlpatch.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration from sqlpatch.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Connection parameters, one section per schema
    pub schemas: HashMap<String, SchemaConfig>,

    /// Tool defaults, overridable from the command line
    #[serde(default)]
    pub defaults: Defaults,
}

/// Connection parameters for one schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Database server host
    pub host: String,

    /// Database server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name
    pub dbname: String,

    /// Connection character set
    #[serde(default = "default_charset")]
    pub charset: String,

    /// User to connect as
    pub user: String,

    /// Password for `user`
    #[serde(default)]
    pub pass: String,
}

/// Tool defaults (the `defaults:` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Schema section to operate on when none is given on the command line
    #[serde(default)]
    pub schema: Option<String>,

    /// Directory holding numbered patch files
    #[serde(default)]
    pub patches_dir: Option<PathBuf>,

    /// Baseline SQL file applied once when no bookmark exists yet
    #[serde(default)]
    pub init_schema: Option<PathBuf>,

    /// Directory holding per-schema bookmark files
    #[serde(default = "default_bookmark_dir")]
    pub bookmark_dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            schema: None,
            patches_dir: None,
            init_schema: None,
            bookmark_dir: default_bookmark_dir(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn load(path: &Path) -> CoreResult<Config> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| CoreError::IoWithPath {
            path: path.display().to_string(),
            source,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Look up the connection parameters for a schema section.
    pub fn schema(&self, name: &str) -> CoreResult<&SchemaConfig> {
        self.schemas
            .get(name)
            .ok_or_else(|| CoreError::SchemaNotFound {
                name: name.to_string(),
            })
    }

    fn validate(&self) -> CoreResult<()> {
        if self.schemas.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "no schema sections defined".to_string(),
            });
        }

        if let Some(name) = &self.defaults.schema {
            if !self.schemas.contains_key(name) {
                return Err(CoreError::SchemaNotFound { name: name.clone() });
            }
        }

        for (name, schema) in &self.schemas {
            if schema.host.is_empty() || schema.dbname.is_empty() || schema.user.is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("schema '{name}' must set host, dbname and user"),
                });
            }
        }

        Ok(())
    }
}

fn default_port() -> u16 {
    3306
}

fn default_charset() -> String {
    "utf8mb4".to_string()
}

fn default_bookmark_dir() -> PathBuf {
    PathBuf::from("bookmarks")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
