//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// sqlpatch - apply numbered SQL patches to a MySQL schema
#[derive(Parser, Debug)]
#[command(name = "sqlpatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Echo every statement before it executes
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(
        short,
        long,
        global = true,
        default_value = "sqlpatch.yml",
        env = "SQLPATCH_CONFIG"
    )]
    pub config: String,

    /// Schema section to operate on (default: defaults.schema from the config)
    #[arg(short, long, global = true)]
    pub schema: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply unapplied patches from the patches directory
    Update(UpdateArgs),

    /// Execute ad-hoc SQL and report stats
    Query(QueryArgs),

    /// Execute SQL statements from a file and report stats
    File(FileArgs),
}

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Directory holding numbered patch files (default: defaults.patches_dir)
    #[arg(short = 'n', long)]
    pub patches_dir: Option<String>,

    /// Baseline SQL file applied once when no bookmark exists yet
    /// (default: defaults.init_schema)
    #[arg(short, long)]
    pub init_schema: Option<String>,
}

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// SQL text to execute
    pub sql: String,
}

/// Arguments for the file command
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Path to the SQL file
    pub path: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
