//! Runtime context for CLI commands

use anyhow::{Context, Result};
use sp_core::registry::bookmark_path;
use sp_core::Config;
use sp_db::{Database, MySqlBackend, PatchEngine, StatementHook};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing the loaded config and database connection
pub struct RuntimeContext {
    /// The loaded configuration
    pub config: Config,

    /// Schema section the run operates on
    pub schema_name: String,

    /// Database connection
    pub db: Arc<dyn Database>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub async fn new(global: &GlobalArgs) -> Result<Self> {
        let config = Config::load(Path::new(&global.config))
            .context("Failed to load configuration file")?;

        let schema_name = global
            .schema
            .clone()
            .or_else(|| config.defaults.schema.clone())
            .context("No schema given; pass --schema or set defaults.schema in the config")?;

        let schema = config.schema(&schema_name)?.clone();

        let db: Arc<dyn Database> = Arc::new(
            MySqlBackend::connect(&schema)
                .await
                .context("Failed to connect to database")?,
        );

        println!(
            "sqlpatch: schema '{}' at {}",
            schema_name,
            MySqlBackend::describe(&schema)
        );

        Ok(Self {
            config,
            schema_name,
            db,
            verbose: global.verbose,
        })
    }

    /// Build a patch engine bound to this schema's bookmark file.
    pub fn engine(&self) -> PatchEngine {
        let bookmark = bookmark_path(&self.config.defaults.bookmark_dir, &self.schema_name);
        PatchEngine::new(self.db.clone(), bookmark)
            .with_statement_hook(statement_echo(self.verbose))
    }

    /// Release the database connection.
    pub async fn close(&self) -> Result<()> {
        self.db.close().await?;
        Ok(())
    }
}

/// Echo hook: full statements when verbose, progress dots otherwise.
fn statement_echo(verbose: bool) -> Box<StatementHook> {
    Box::new(move |index, statement| {
        if verbose {
            println!("sqlpatch[{index}]> {statement}");
        } else {
            print!(".");
            let _ = std::io::stdout().flush();
        }
    })
}
