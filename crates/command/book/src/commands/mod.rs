//! Commands available to Angelic Buster routines.

mod adjust;
mod flash_jump;
pub mod skills;

pub use adjust::Adjust;
pub use flash_jump::FlashJump;
pub use skills::{buff, celestial_roar, erda_fountain, supernova};
