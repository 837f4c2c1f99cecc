//! Query command implementation - execute ad-hoc SQL

use anyhow::Result;

use crate::cli::{GlobalArgs, QueryArgs};
use crate::commands::common::print_stats;
use crate::context::RuntimeContext;

/// Execute the query command
pub async fn execute(args: &QueryArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global).await?;

    let engine = ctx.engine();
    let result = engine.run_query(&args.sql).await;
    ctx.close().await?;
    let stats = result?;

    println!();
    print_stats(&stats);

    Ok(())
}
