//! Tolerances and loop timings shared by every command.
use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Externally configured tolerances and polling parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Error below which a coarse movement step counts as arrived.
    pub move_tolerance: f64,
    /// Error below which fine adjustment stops.
    pub adjust_tolerance: f64,
    /// Delay between position samples while a direction is held.
    pub poll_interval: Duration,
    /// Maximum samples per directional hold before the key is released anyway.
    pub max_hold_polls: u32,
    /// Pause bracketing the controlled descent.
    pub settle_pause: Duration,
    /// Step budget for adjustments that do not specify one.
    pub default_max_steps: u32,
    /// Insert short random hesitations before non-upward steps.
    pub stage_fright: bool,
}

impl Settings {
    pub const DEFAULT_MOVE_TOLERANCE: f64 = 0.1;
    pub const DEFAULT_ADJUST_TOLERANCE: f64 = 0.01;
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
    pub const DEFAULT_MAX_HOLD_POLLS: u32 = 60;
    pub const DEFAULT_SETTLE_PAUSE: Duration = Duration::from_millis(50);
    pub const DEFAULT_MAX_STEPS: u32 = 5;

    pub fn new() -> Self {
        Self {
            move_tolerance: Self::DEFAULT_MOVE_TOLERANCE,
            adjust_tolerance: Self::DEFAULT_ADJUST_TOLERANCE,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            max_hold_polls: Self::DEFAULT_MAX_HOLD_POLLS,
            settle_pause: Self::DEFAULT_SETTLE_PAUSE,
            default_max_steps: Self::DEFAULT_MAX_STEPS,
            stage_fright: false,
        }
    }

    pub fn with_move_tolerance(mut self, tolerance: f64) -> Self {
        self.move_tolerance = tolerance;
        self
    }

    pub fn with_adjust_tolerance(mut self, tolerance: f64) -> Self {
        self.adjust_tolerance = tolerance;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_hold_polls(mut self, polls: u32) -> Self {
        self.max_hold_polls = polls;
        self
    }

    pub fn with_stage_fright(mut self, enabled: bool) -> Self {
        self.stage_fright = enabled;
        self
    }

    /// Per-axis threshold: the tolerance radius projected onto one axis.
    pub fn axis_threshold(&self) -> f64 {
        self.adjust_tolerance / std::f64::consts::SQRT_2
    }

    /// Construct settings from process environment variables.
    ///
    /// Environment variables:
    /// - `COMMAND_MOVE_TOLERANCE` - Coarse movement tolerance (default: 0.1)
    /// - `COMMAND_ADJUST_TOLERANCE` - Fine adjustment tolerance (default: 0.01)
    /// - `COMMAND_POLL_INTERVAL_MS` - Position sampling interval (default: 50)
    /// - `COMMAND_MAX_HOLD_POLLS` - Samples per directional hold (default: 60)
    /// - `COMMAND_SETTLE_PAUSE_MS` - Descent settling pause (default: 50)
    /// - `COMMAND_MAX_STEPS` - Default adjustment step budget (default: 5)
    /// - `COMMAND_STAGE_FRIGHT` - Random hesitation before steps (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(tolerance) = read_env::<f64>("COMMAND_MOVE_TOLERANCE") {
            settings.move_tolerance = tolerance;
        }
        if let Some(tolerance) = read_env::<f64>("COMMAND_ADJUST_TOLERANCE") {
            settings.adjust_tolerance = tolerance;
        }
        if let Some(millis) = read_env::<u64>("COMMAND_POLL_INTERVAL_MS") {
            settings.poll_interval = Duration::from_millis(millis);
        }
        if let Some(polls) = read_env::<u32>("COMMAND_MAX_HOLD_POLLS") {
            settings.max_hold_polls = polls;
        }
        if let Some(millis) = read_env::<u64>("COMMAND_SETTLE_PAUSE_MS") {
            settings.settle_pause = Duration::from_millis(millis);
        }
        if let Some(steps) = read_env::<u32>("COMMAND_MAX_STEPS") {
            settings.default_max_steps = steps;
        }
        if let Some(enabled) = read_env::<bool>("COMMAND_STAGE_FRIGHT") {
            settings.stage_fright = enabled;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Rejects tolerances that are not positive and timings that would stall
    /// or skip the polling loops.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_tolerance("move_tolerance", self.move_tolerance)?;
        check_tolerance("adjust_tolerance", self.adjust_tolerance)?;
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidTiming {
                name: "poll_interval",
            });
        }
        if self.max_hold_polls == 0 {
            return Err(ConfigError::InvalidTiming {
                name: "max_hold_polls",
            });
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance { name, value })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
