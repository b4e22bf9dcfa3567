//! Development tasks for the command book
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Simulate, Validate};

/// Development tasks for the command book
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for command book routines", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "command_core=trace")
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Build every command of a routine file and report validation errors
    Validate(Validate),

    /// Run a routine against the simulated world
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for COMMAND_* settings and RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(&cli.log)?;

    match cli.command {
        Command::Validate(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
