//! Curriculum CLI: validate, lint, cross-check and export course content.
//!
//! Loads per-language curricula from a content directory, assembles them
//! through the validating core, and reports what a renderer would trip over.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
