//! Cooperative cancellation.
//!
//! Loops check [`Cancellation::is_running`] at every iteration boundary and
//! return as soon as it reports `false`. There is no preemption.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Predicate consulted at every loop boundary.
pub trait Cancellation {
    fn is_running(&self) -> bool;
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    #[inline]
    fn is_running(&self) -> bool {
        self()
    }
}

/// Process-wide run flag shared between the lifecycle owner and commands.
///
/// Clones share the same flag. Commands only read it.
#[derive(Clone, Debug)]
pub struct RunFlag {
    enabled: Arc<AtomicBool>,
}

impl RunFlag {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Cancellation for RunFlag {
    fn is_running(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}
