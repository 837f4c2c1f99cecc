//! sqlpatch CLI - apply numbered SQL patches to a MySQL schema

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{file, query, update};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Update(args) => update::execute(args, &cli.global).await,
        cli::Commands::Query(args) => query::execute(args, &cli.global).await,
        cli::Commands::File(args) => file::execute(args, &cli.global).await,
    }
}
