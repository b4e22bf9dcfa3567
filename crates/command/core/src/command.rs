//! The entry point every schedulable command implements.

use crate::context::ActionContext;

/// What a single command invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// At least one input was emitted.
    Performed,

    /// Nothing was due this tick (cooldowns not elapsed, already in position).
    Skipped,

    /// The run flag was cleared before the command finished.
    Cancelled,
}

impl Status {
    #[inline]
    pub fn is_performed(self) -> bool {
        matches!(self, Status::Performed)
    }

    #[inline]
    pub fn is_skipped(self) -> bool {
        matches!(self, Status::Skipped)
    }
}

/// A command the external scheduler invokes once per tick.
///
/// Implementations keep their own mutable state (cooldown timers, last
/// convergence report) across invocations and are never re-entered.
pub trait Command: Send {
    /// Stable lowercase name used in routines and logs.
    fn name(&self) -> &'static str;

    /// Runs the command against the given context.
    fn execute(&mut self, ctx: &ActionContext<'_>) -> Status;
}

impl<C: Command + ?Sized> Command for Box<C> {
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn execute(&mut self, ctx: &ActionContext<'_>) -> Status {
        (**self).execute(ctx)
    }
}
