// fieldscan/src/main.rs
//! fieldscan entry point.
//!
//! Loads `.env`, parses the command line, sets up logging and hands off to
//! the selected command.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use fieldscan::cli::Cli;
use fieldscan::{commands, logger};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    commands::run(cli).await
}
