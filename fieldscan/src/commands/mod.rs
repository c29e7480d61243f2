// fieldscan/src/commands/mod.rs
//! Subcommand implementations and the configuration loading they share.

pub mod check;
pub mod render;
pub mod reports;
pub mod serve;

use anyhow::Result;
use log::debug;

use fieldscan_core::ScanConfig;

use crate::cli::{Cli, Commands};

/// Builds the effective configuration for a run.
///
/// An explicit `--config` file is merged over the built-in defaults; without
/// one the usual locations are searched. The enable/disable lists are applied
/// last.
pub fn load_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::with_overlay(ScanConfig::load_default()?, path)?,
        None => ScanConfig::discover()?,
    };
    if !cli.enable_rules.is_empty() || !cli.disable_rules.is_empty() {
        config.set_active_rules(&cli.enable_rules, &cli.disable_rules);
    }
    debug!(
        "Effective configuration: {} rules, {} reports.",
        config.rules.len(),
        config.reports.len()
    );
    Ok(config)
}

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Serve(args) => serve::run(load_config(&cli)?, args).await,
        Commands::Render(args) => render::run(&load_config(&cli)?, args),
        Commands::Reports => reports::run(&load_config(&cli)?),
        Commands::Check { file } => check::run(file),
    }
}
