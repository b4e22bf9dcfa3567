//! Angelic Buster command book.
//!
//! This crate binds the generic machinery of `command-core` to one character
//! class:
//! - [`KeyBindings`] maps each movement input and skill to a key
//! - [`Moves`] implements flash-jump movement and the controller's vertical
//!   traversal
//! - [`commands`] holds the schedulable commands (adjust, buffs, skills)
//! - [`CommandBook`] builds commands from routine names and string arguments
//!
//! With the `loaders` feature (default), key bindings and routines can be read
//! from RON files.

pub mod commands;
pub mod factory;
pub mod keys;
pub mod movement;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use commands::{Adjust, FlashJump, buff, celestial_roar, erda_fountain, supernova};
pub use factory::{CommandBook, CommandKind};
pub use keys::KeyBindings;
pub use movement::Moves;

#[cfg(feature = "loaders")]
pub use loaders::{BindingsLoader, RoutineEntry, RoutineLoader};
