//! Update command implementation - apply unapplied patches

use anyhow::{Context, Result};
use sp_db::discover_patches;
use std::path::PathBuf;

use crate::cli::{GlobalArgs, UpdateArgs};
use crate::commands::common::print_stats;
use crate::context::RuntimeContext;

/// Execute the update command
pub async fn execute(args: &UpdateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;

    let patches_dir: PathBuf = args
        .patches_dir
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| ctx.config.defaults.patches_dir.clone())
        .context(
            "No patches directory; pass --patches-dir or set defaults.patches_dir in the config",
        )?;

    let init_schema: Option<PathBuf> = args
        .init_schema
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| ctx.config.defaults.init_schema.clone());

    let patches = discover_patches(&patches_dir).with_context(|| {
        format!("Failed to scan patches directory '{}'", patches_dir.display())
    })?;

    let engine = ctx.engine();
    let result = engine.run_patch_set(&patches, init_schema.as_deref()).await;
    ctx.close().await?;
    let summary = result?;

    if let Some(stats) = &summary.bootstrap {
        println!();
        println!("* Initial schema");
        print_stats(stats);
    }

    for outcome in &summary.outcomes {
        println!();
        println!(
            "* Patch {}/{} [{}]",
            outcome.number, summary.version, outcome.name
        );
        print_stats(&outcome.stats);
    }

    println!();
    println!("* {summary}");

    Ok(())
}
