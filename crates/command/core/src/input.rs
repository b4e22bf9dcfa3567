//! Contract for the low-level input emulation layer.
//!
//! The driver translates an abstract key identifier plus timing parameters into
//! real press and release events. Calls are fire-and-forget: the core never
//! inspects a return value.

use std::fmt;
use std::time::Duration;

/// Abstract key identifier understood by the input driver (`"space"`, `"left"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Key(String);

impl Key {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How many down/up pulses to emit and how long each half lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressSpec {
    pub count: u32,
    pub down_time: Duration,
    pub up_time: Duration,
}

impl PressSpec {
    pub const DEFAULT_DOWN_TIME: Duration = Duration::from_millis(50);
    pub const DEFAULT_UP_TIME: Duration = Duration::from_millis(100);

    /// `count` pulses with the default timings.
    pub const fn times(count: u32) -> Self {
        Self {
            count,
            down_time: Self::DEFAULT_DOWN_TIME,
            up_time: Self::DEFAULT_UP_TIME,
        }
    }

    /// A single short directional tap used to turn the character around.
    pub const fn tap() -> Self {
        Self {
            count: 1,
            down_time: Duration::from_millis(100),
            up_time: Duration::from_millis(50),
        }
    }

    pub const fn with_down_time(mut self, down_time: Duration) -> Self {
        self.down_time = down_time;
        self
    }

    pub const fn with_up_time(mut self, up_time: Duration) -> Self {
        self.up_time = up_time;
        self
    }

    /// Wall-clock time the whole press sequence occupies.
    pub fn total_duration(&self) -> Duration {
        (self.down_time + self.up_time) * self.count
    }
}

impl Default for PressSpec {
    fn default() -> Self {
        Self::times(1)
    }
}

/// Input emulation primitives consumed by commands.
pub trait InputDriver {
    /// Emits `spec.count` down/up pulses of `key`.
    fn press(&self, key: &Key, spec: PressSpec);

    /// Asserts the held state of `key`.
    fn key_down(&self, key: &Key);

    /// Releases the held state of `key`.
    fn key_up(&self, key: &Key);
}

impl<T: InputDriver + ?Sized> InputDriver for &T {
    #[inline]
    fn press(&self, key: &Key, spec: PressSpec) {
        (**self).press(key, spec)
    }

    #[inline]
    fn key_down(&self, key: &Key) {
        (**self).key_down(key)
    }

    #[inline]
    fn key_up(&self, key: &Key) {
        (**self).key_up(key)
    }
}

/// A held key that is released when the guard goes out of scope.
///
/// Every `key_down` issued by a command goes through this guard, so early
/// returns, cancellation and unwinding all end with exactly one `key_up`.
#[must_use = "dropping the guard releases the key immediately"]
pub struct KeyHold<'a> {
    input: &'a dyn InputDriver,
    key: Key,
}

impl<'a> KeyHold<'a> {
    pub fn press(input: &'a dyn InputDriver, key: Key) -> Self {
        tracing::trace!(%key, "key down");
        input.key_down(&key);
        Self { input, key }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Releases the key now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for KeyHold<'_> {
    fn drop(&mut self) {
        tracing::trace!(key = %self.key, "key up");
        self.input.key_up(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: RefCell<Vec<String>>,
    }

    impl InputDriver for Recorder {
        fn press(&self, key: &Key, spec: PressSpec) {
            self.log.borrow_mut().push(format!("press {key} x{}", spec.count));
        }

        fn key_down(&self, key: &Key) {
            self.log.borrow_mut().push(format!("down {key}"));
        }

        fn key_up(&self, key: &Key) {
            self.log.borrow_mut().push(format!("up {key}"));
        }
    }

    #[test]
    fn hold_releases_on_scope_exit() {
        let recorder = Recorder::default();
        {
            let _hold = KeyHold::press(&recorder, Key::from("left"));
            recorder.press(&Key::from("space"), PressSpec::times(2));
        }
        assert_eq!(
            *recorder.log.borrow(),
            vec!["down left", "press space x2", "up left"]
        );
    }

    #[test]
    fn explicit_release_does_not_double_release() {
        let recorder = Recorder::default();
        let hold = KeyHold::press(&recorder, Key::from("down"));
        hold.release();
        assert_eq!(*recorder.log.borrow(), vec!["down down", "up down"]);
    }

    #[test]
    fn press_duration_covers_every_pulse() {
        let spec = PressSpec::times(3).with_down_time(Duration::from_millis(100));
        assert_eq!(spec.total_duration(), Duration::from_millis(600));
        assert_eq!(PressSpec::tap().total_duration(), Duration::from_millis(150));
    }
}
