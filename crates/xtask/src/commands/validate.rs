//! Validate a routine file without running it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use command_book::RoutineLoader;
use command_core::Settings;
use console::style;

/// Build every command of a routine file and report validation errors
#[derive(Parser, Debug)]
pub struct Validate {
    /// Routine file (RON list of commands)
    #[arg(value_name = "ROUTINE")]
    pub routine: PathBuf,

    /// Key bindings file (RON); defaults to the built-in bindings
    #[arg(short, long, value_name = "FILE")]
    pub bindings: Option<PathBuf>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let settings = Settings::from_env().context("Invalid COMMAND_* settings")?;
        let book = super::load_book(self.bindings.as_deref(), &settings)?;

        match RoutineLoader::load(&self.routine, &book) {
            Ok(commands) => {
                println!(
                    "{} {} ({} commands)",
                    style("✓").green().bold(),
                    self.routine.display(),
                    commands.len()
                );
                for (index, command) in commands.iter().enumerate() {
                    println!("  {:>3}. {}", index + 1, command.name());
                }
                Ok(())
            }
            Err(err) => {
                eprintln!(
                    "{} {}",
                    style("✗").red().bold(),
                    self.routine.display()
                );
                for cause in err.chain() {
                    eprintln!("    {}", style(cause).dim());
                }
                anyhow::bail!("routine validation failed")
            }
        }
    }
}
