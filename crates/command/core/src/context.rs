//! Read-only view of everything a command may consult while it runs.

use std::time::Duration;

use crate::cancel::Cancellation;
use crate::input::{InputDriver, Key, KeyHold, PressSpec};
use crate::position::{Position, PositionSource};
use crate::settings::Settings;
use crate::time::{Clock, Timestamp};

/// Bundles the collaborators a command runs against.
///
/// The context is built by whoever schedules commands and handed to each one
/// for the duration of a single invocation.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    input: &'a dyn InputDriver,
    position: &'a dyn PositionSource,
    clock: &'a dyn Clock,
    cancellation: &'a dyn Cancellation,
    settings: &'a Settings,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        input: &'a dyn InputDriver,
        position: &'a dyn PositionSource,
        clock: &'a dyn Clock,
        cancellation: &'a dyn Cancellation,
        settings: &'a Settings,
    ) -> Self {
        Self {
            input,
            position,
            clock,
            cancellation,
            settings,
        }
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn input(&self) -> &'a dyn InputDriver {
        self.input
    }

    /// Freshly sampled position estimate.
    pub fn position(&self) -> Position {
        self.position.current()
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            self.clock.sleep(duration);
        }
    }

    pub fn is_running(&self) -> bool {
        self.cancellation.is_running()
    }

    pub fn press(&self, key: &Key, spec: PressSpec) {
        tracing::trace!(%key, count = spec.count, "press");
        self.input.press(key, spec);
    }

    /// Holds `key` until the returned guard is dropped.
    pub fn hold(&self, key: Key) -> KeyHold<'a> {
        KeyHold::press(self.input, key)
    }
}
