//! uxkit CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use uxkit_core::ToolkitConfig;

mod cli;
mod commands;
mod ui;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ToolkitConfig::load().context("Failed to load configuration")?;
    let level = cli.log_level().unwrap_or(config.log_level);
    if let Err(e) = uxkit_core::log::init(level) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    match cli.execute(&config).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
