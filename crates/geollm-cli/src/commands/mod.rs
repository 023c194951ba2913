//! Command implementations

mod area;
mod ask;
mod buffer;
mod config;
mod geocode;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(cli.config.as_deref(), cli.config_overrides())?;

    match cli.command {
        Commands::Geocode(args) => geocode::execute(args, &config, &output).await,
        Commands::Buffer(args) => buffer::execute(args, &output),
        Commands::Area(args) => area::execute(args, &output),
        Commands::Ask(args) => ask::execute(args, &config, &output).await,
        Commands::Config => config::execute(&config, &output),
    }
}
