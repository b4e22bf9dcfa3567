//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod simulate;
mod validate;

pub use simulate::Simulate;
pub use validate::Validate;

use std::path::Path;

use anyhow::Result;
use command_book::{BindingsLoader, CommandBook, KeyBindings};
use command_core::Settings;

/// Builds the command book from an optional bindings file.
fn load_book(bindings: Option<&Path>, settings: &Settings) -> Result<CommandBook> {
    let bindings = match bindings {
        Some(path) => BindingsLoader::load(path)?,
        None => KeyBindings::default(),
    };
    Ok(CommandBook::new(bindings).with_default_max_steps(settings.default_max_steps))
}
