//! navdata CLI - documentation navigation data.
//!
//! Provides commands for:
//! - `convert`: Re-emit navigation data as JSON, YAML or navtree JavaScript
//! - `check`: Validate navigation data and optionally its link targets
//! - `show`: Print the navigation tree as an outline

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ConvertArgs, ShowArgs};
use output::Output;

/// navdata - documentation navigation data tool.
#[derive(Parser)]
#[command(name = "navdata", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert navigation data between formats.
    Convert(ConvertArgs),
    /// Validate navigation data and its link targets.
    Check(CheckArgs),
    /// Print the navigation tree as an outline.
    Show(ShowArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Convert(args) => args.common.verbose,
            Self::Check(args) => args.common.verbose,
            Self::Show(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
