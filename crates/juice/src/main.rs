//! Juice CLI - template directive compiler.
//!
//! Provides commands for:
//! - `directives`: List the configured directive set
//! - `compile`: Compile a sequence of directive occurrences

mod commands;
mod error;
mod output;
mod registry;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CompileArgs, DirectivesArgs};
use output::Output;

/// Juice - template directive compiler.
#[derive(Parser)]
#[command(name = "juice", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered directives and their aliases.
    Directives(DirectivesArgs),
    /// Compile directive occurrences in order.
    Compile(CompileArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Directives(args) => args.verbose,
        Commands::Compile(args) => args.verbose,
    };

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Directives(args) => args.execute(),
        Commands::Compile(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
