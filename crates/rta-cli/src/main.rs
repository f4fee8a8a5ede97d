//! # rta CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// RTA Stack CLI — tamper-evident credential toolchain.
///
/// Manages signing keys, signs and verifies JSON documents with the
/// issuing key, and runs an end-to-end workflow demo.
#[derive(Parser, Debug)]
#[command(name = "rta", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate or inspect signing key files.
    Key(rta_cli::key::KeyArgs),
    /// Canonicalize and sign a JSON document.
    Sign(rta_cli::sign::SignArgs),
    /// Verify a detached signature over a JSON document.
    Verify(rta_cli::sign::VerifyArgs),
    /// Run the in-memory end-to-end walkthrough.
    Demo(rta_cli::demo::DemoArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Key(args) => rta_cli::key::run(args),
        Commands::Sign(args) => rta_cli::sign::run_sign(args),
        Commands::Verify(args) => rta_cli::sign::run_verify(args),
        Commands::Demo(args) => rta_cli::demo::run(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
