//! File command implementation - execute SQL statements from a file

use anyhow::Result;
use std::path::Path;

use crate::cli::{FileArgs, GlobalArgs};
use crate::commands::common::print_stats;
use crate::context::RuntimeContext;

/// Execute the file command
pub async fn execute(args: &FileArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;

    let engine = ctx.engine();
    let result = engine.run_file(Path::new(&args.path)).await;
    ctx.close().await?;
    let stats = result?;

    println!();
    print_stats(&stats);

    Ok(())
}
