// fieldscan/src/cli.rs
//! This file defines the command-line interface (CLI) for the fieldscan
//! application, including all available commands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "fieldscan",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scan content fields with regular expressions and report the matches as HTML",
    long_about = "fieldscan lists the documents of a content type, scans their configured text fields (or the text fields of their section components) with a set of regular expressions, and renders an HTML table of every document that matched.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Configuration file merged over the built-in rules and reports.
    #[arg(long, short = 'c', value_name = "FILE", env = "FIELDSCAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Opt-in rules to switch on.
    #[arg(long = "enable-rules", value_delimiter = ',', value_name = "RULES", global = true)]
    pub enable_rules: Vec<String>,

    /// Rules to switch off.
    #[arg(long = "disable-rules", value_delimiter = ',', value_name = "RULES", global = true)]
    pub disable_rules: Vec<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `fieldscan` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serves every configured report over HTTP.
    Serve(ServeCommand),

    /// Renders one report and writes the HTML to stdout or a file.
    Render(RenderCommand),

    /// Lists configured reports and pattern rules.
    Reports,

    /// Validates a configuration file without running anything.
    Check {
        /// Configuration file to validate.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Where the documents come from.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Repository file (YAML or JSON) holding documents and components.
    #[arg(long, short = 's', value_name = "FILE", env = "FIELDSCAN_STORE")]
    pub store: PathBuf,

    /// Base of the canonical document URLs.
    #[arg(long, value_name = "URL", env = "FIELDSCAN_BASE_URL", default_value = "http://localhost")]
    pub base_url: String,
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeCommand {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Address to listen on.
    #[arg(long, short = 'l', value_name = "ADDR", env = "FIELDSCAN_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Name of the report to render (see `fieldscan reports`).
    #[arg(value_name = "REPORT")]
    pub report: String,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Write the HTML to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit the deployed handlers' exact markup instead of the corrected document.
    #[arg(long)]
    pub legacy: bool,
}
