//! TaskList CLI
//!
//! Manages a JSON-file-backed task list from the command line. Each
//! command runs one load-operate-save cycle against the storage file.

mod commands;

use clap::Parser;

use crate::commands::Command;

#[derive(Parser)]
#[command(name = "tl", version, about = "Manage a JSON-file-backed task list")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run(cli.command).await
}
