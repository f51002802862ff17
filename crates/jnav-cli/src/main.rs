//! # jnav CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jnav_cli::check::{run_check, CheckArgs};
use jnav_cli::get::{run_get, GetArgs};
use jnav_cli::inspect::{run_inspect, InspectArgs};
use jnav_cli::remove::{run_remove, RemoveArgs};
use jnav_cli::set::{run_set, SetArgs};
use jnav_cli::{GlobalOpts, EXIT_ERROR};

/// Read, write, and validate JSON documents by path.
#[derive(Parser, Debug)]
#[command(name = "jnav", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path segment separator.
    #[arg(long, default_value_t = '.', global = true)]
    separator: char,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the node at a path.
    Get(GetArgs),

    /// Write a value at a path, creating missing containers.
    Set(SetArgs),

    /// Remove the member at a path.
    Remove(RemoveArgs),

    /// Show existence, emptiness, type, size, and members of a path.
    Inspect(InspectArgs),

    /// Validate a document against a node-configuration schema.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG applies only when no -v flag is given.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let opts = GlobalOpts {
        separator: cli.separator,
        pretty: cli.pretty,
    };
    tracing::debug!(separator = %opts.separator, pretty = opts.pretty, "jnav starting");

    let mut stdout = io::stdout().lock();
    let result = match &cli.command {
        Commands::Get(args) => run_get(args, &opts, &mut stdout),
        Commands::Set(args) => run_set(args, &opts, &mut stdout),
        Commands::Remove(args) => run_remove(args, &opts, &mut stdout),
        Commands::Inspect(args) => run_inspect(args, &opts, &mut stdout),
        Commands::Check(args) => run_check(args, &opts, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
