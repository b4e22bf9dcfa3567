//! Per-ability cooldown bookkeeping.

use std::time::Duration;

use crate::time::Timestamp;

/// Returns `true` when an ability may be cast at `now`.
///
/// An ability that was never cast is always ready. Otherwise strictly more
/// than `interval` must have elapsed, so a cast is never repeated inside one
/// window even when the scheduler tick lands exactly on the boundary.
pub fn ready(now: Timestamp, last_cast: Option<Timestamp>, interval: Duration) -> bool {
    match last_cast {
        None => true,
        Some(last) => now.saturating_since(last) > interval,
    }
}

/// Cooldown state owned by exactly one ability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CooldownTimer {
    interval: Duration,
    last_cast: Option<Timestamp>,
}

impl CooldownTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_cast: None,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_cast(&self) -> Option<Timestamp> {
        self.last_cast
    }

    pub fn is_ready(&self, now: Timestamp) -> bool {
        ready(now, self.last_cast, self.interval)
    }

    /// Records a cast issued at `now`. Earlier timestamps are ignored so the
    /// recorded time never moves backwards.
    pub fn mark_cast(&mut self, now: Timestamp) {
        if self.last_cast.is_none_or(|last| now >= last) {
            self.last_cast = Some(now);
        }
    }

    /// Time left until the ability becomes ready, zero when it already is.
    pub fn remaining(&self, now: Timestamp) -> Duration {
        match self.last_cast {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.saturating_since(last)),
        }
    }
}
