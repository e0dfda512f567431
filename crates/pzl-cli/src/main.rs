//! # pzl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pzl_cli::allowlist::{run_allowlist, AllowlistArgs};
use pzl_cli::elements::{run_elements, ElementsArgs};
use pzl_cli::load_config;
use pzl_cli::validate::{run_validate, ValidateArgs};

/// Puzzle content validator.
///
/// Checks puzzle documents for well-formed authorship metadata and
/// restricts the elements their compiled output may render.
#[derive(Parser, Debug)]
#[command(name = "pzl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file. Defaults to ./pzl.yaml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every document under the content root, or a single document.
    Validate(ValidateArgs),

    /// List the elements a document instantiates.
    Elements(ElementsArgs),

    /// Print the effective element allow-list, or test names against it.
    Allowlist(AllowlistArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("pzl CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let result = load_config(cli.config.as_deref(), &cwd).and_then(|config| match &cli.command {
        Commands::Validate(args) => run_validate(args, &config, &cwd),
        Commands::Elements(args) => run_elements(args, &config, &cwd),
        Commands::Allowlist(args) => run_allowlist(args, &config, &cwd),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
