//! Locus CLI - documentation page locator.
//!
//! Provides commands for:
//! - `layout`: Print the output path of every page
//! - `build`: Render the page tree into an output directory
//! - `resolve`: Resolve one code reference to a link

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, LayoutArgs, ResolveArgs};
use output::Output;

/// Locus - documentation page locator.
#[derive(Parser)]
#[command(name = "locus", version, about)]
struct Cli {
    /// Enable verbose output (INFO level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the output path of every page.
    Layout(LayoutArgs),
    /// Render the page tree into the output directory.
    Build(BuildArgs),
    /// Resolve a code reference to a local path or external URL.
    Resolve(ResolveArgs),
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

    let result = match cli.command {
        Commands::Layout(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
