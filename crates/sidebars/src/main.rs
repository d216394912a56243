//! Sidebars CLI - sidebar loading and navigation.
//!
//! Provides commands for:
//! - `show`: Print processed sidebars as JSON
//! - `check`: Validate sidebars and report broken document references
//! - `nav`: Show previous/next links for a document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, ShowArgs};
use output::Output;

/// Sidebars - load, check and navigate documentation sidebars.
#[derive(Parser)]
#[command(name = "sidebars", version, about)]
struct Cli {
    /// Enable verbose output (pipeline timing and catalog logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print processed sidebars as JSON.
    Show(ShowArgs),
    /// Validate sidebars and report broken document references.
    Check(CheckArgs),
    /// Show previous/next links for a document.
    Nav(NavArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = tokio::runtime::Runtime::new()
        .map_err(error::CliError::from)
        .and_then(|rt| match cli.command {
            Commands::Show(args) => rt.block_on(args.execute()),
            Commands::Check(args) => rt.block_on(args.execute()),
            Commands::Nav(args) => rt.block_on(args.execute()),
        });

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        if err.is_temporary() {
            output.status("The docs catalog was temporarily unavailable, retrying may succeed");
        }
        std::process::exit(1);
    }
}
