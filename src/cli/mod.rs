//! Command-line interface for codebase-consolidator
//!
//! Provides `consolidate`, `preview` and `completions` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod completions;
mod consolidate;
mod output;
mod preview;
mod utils;

/// Consolidate a codebase into a bounded set of size-balanced Markdown documents
#[derive(Parser)]
#[command(name = "codebase-consolidator")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging and show every skipped entry
    #[arg(short, long, global = true, env = "CONSOLIDATOR_VERBOSE")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the part documents and README index for a directory
    Consolidate(Box<consolidate::ConsolidateArgs>),

    /// Show which files would be included and how they would be split, without writing
    Preview(preview::PreviewArgs),

    /// Print a shell completion script
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Consolidate(args) => consolidate::run(*args, cli.verbose),
        Commands::Preview(args) => preview::run(args, cli.verbose),
        Commands::Completions(args) => completions::run(args),
    }
}
