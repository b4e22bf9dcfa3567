//! Input-emulation primitives and the two control algorithms shared by every
//! command book.
//!
//! `command-core` knows nothing about a particular character class. It defines
//! the contracts a command runs against (input driver, position source, clock,
//! cancellation) and the reusable pieces built on top of them:
//!
//! - [`cooldown`] gates abilities on wall-clock elapsed time
//! - [`heuristic`] picks a facing when no direction was configured
//! - [`gated`] dispatches cooldown-gated casts and repeated-attack bursts
//! - [`controller`] converges the character onto a target point
//!
//! Commands receive an [`ActionContext`] instead of reaching for globals, so
//! every collaborator can be swapped for the simulated world in [`mock`].
pub mod cancel;
pub mod command;
pub mod context;
pub mod controller;
pub mod cooldown;
pub mod direction;
pub mod error;
pub mod gated;
pub mod heuristic;
pub mod input;
pub mod position;
pub mod settings;
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use cancel::{Cancellation, RunFlag};
pub use command::{Command, Status};
pub use context::ActionContext;
pub use controller::{
    Axis, ConvergeOutcome, ConvergeReport, Correction, PositionFeedbackController, Traversal,
};
pub use cooldown::CooldownTimer;
pub use direction::{Direction, HorizontalDirection};
pub use error::{ConfigError, validate_coordinate, validate_nonnegative_int};
pub use gated::{AttackBurst, BurstTiming, CooldownGatedAction, Facing, GatedAbility};
pub use heuristic::resolve_direction;
pub use input::{InputDriver, Key, KeyHold, PressSpec};
pub use position::{Position, PositionSource};
pub use settings::Settings;
pub use time::{Clock, SystemClock, Timestamp};

#[cfg(feature = "mock")]
pub use mock::{InputEvent, SimWorld};
