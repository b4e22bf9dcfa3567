//! Simulated world for tests and dry runs.
//!
//! [`SimWorld`] implements the input, position and clock contracts at once: a
//! virtual clock that only advances when something sleeps or presses a key, a
//! log of every emitted input event, and simple kinematics so that held arrow
//! keys and jumps actually move the character.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cancel::Cancellation;
use crate::context::ActionContext;
use crate::input::{InputDriver, Key, PressSpec};
use crate::position::{Position, PositionSource};
use crate::settings::Settings;
use crate::time::{Clock, Timestamp};

/// One input event as seen by the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Press { key: Key, spec: PressSpec },
    Down(Key),
    Up(Key),
}

impl InputEvent {
    pub fn press(key: &str, spec: PressSpec) -> Self {
        InputEvent::Press {
            key: Key::from(key),
            spec,
        }
    }

    pub fn down(key: &str) -> Self {
        InputEvent::Down(Key::from(key))
    }

    pub fn up(key: &str) -> Self {
        InputEvent::Up(Key::from(key))
    }

    pub fn key(&self) -> &Key {
        match self {
            InputEvent::Press { key, .. } | InputEvent::Down(key) | InputEvent::Up(key) => key,
        }
    }
}

struct SimState {
    now: Duration,
    position: Position,
    held: Vec<Key>,
    events: Vec<InputEvent>,
    position_reads: usize,
}

#[derive(Clone, Debug)]
struct Kinematics {
    walk_speed: f64,
    slide: Duration,
    jump_key: Key,
    rise_per_jump: f64,
    drop_per_jump: f64,
    frozen: bool,
}

/// In-memory character driven by emulated input.
pub struct SimWorld {
    state: Mutex<SimState>,
    kinematics: Kinematics,
}

impl SimWorld {
    pub const DEFAULT_WALK_SPEED: f64 = 0.1;
    pub const DEFAULT_RISE_PER_JUMP: f64 = 0.02;
    pub const DEFAULT_DROP_PER_JUMP: f64 = 0.02;

    pub fn new(start: Position) -> Self {
        Self {
            state: Mutex::new(SimState {
                now: Duration::ZERO,
                position: start,
                held: Vec::new(),
                events: Vec::new(),
                position_reads: 0,
            }),
            kinematics: Kinematics {
                walk_speed: Self::DEFAULT_WALK_SPEED,
                slide: Duration::ZERO,
                jump_key: Key::from("space"),
                rise_per_jump: Self::DEFAULT_RISE_PER_JUMP,
                drop_per_jump: Self::DEFAULT_DROP_PER_JUMP,
                frozen: false,
            },
        }
    }

    /// Horizontal distance covered per second while an arrow is held.
    pub fn with_walk_speed(mut self, speed: f64) -> Self {
        self.kinematics.walk_speed = speed;
        self
    }

    /// Extra travel after a horizontal arrow is released, to model overshoot.
    pub fn with_slide(mut self, slide: Duration) -> Self {
        self.kinematics.slide = slide;
        self
    }

    pub fn with_jump_key(mut self, key: Key) -> Self {
        self.kinematics.jump_key = key;
        self
    }

    /// Vertical travel per jump press while holding up (`rise`) or down (`drop`).
    pub fn with_vertical_step(mut self, rise: f64, drop: f64) -> Self {
        self.kinematics.rise_per_jump = rise;
        self.kinematics.drop_per_jump = drop;
        self
    }

    /// The tracker stops updating: inputs are recorded but nothing moves.
    pub fn frozen(mut self) -> Self {
        self.kinematics.frozen = true;
        self
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<InputEvent> {
        self.state().events.clone()
    }

    pub fn clear_events(&self) {
        self.state().events.clear();
    }

    pub fn held_keys(&self) -> Vec<Key> {
        self.state().held.clone()
    }

    pub fn position_reads(&self) -> usize {
        self.state().position_reads
    }

    pub fn set_position(&self, position: Position) {
        self.state().position = position;
    }

    /// Position without counting as a tracker read.
    pub fn peek_position(&self) -> Position {
        self.state().position
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_duration(self.state().now)
    }

    /// Moves the virtual clock forward, applying any held movement.
    pub fn advance(&self, duration: Duration) {
        let mut state = self.state();
        self.integrate(&mut state, duration);
    }

    /// Runs `f` against a context backed by this world and an always-set run flag.
    pub fn run<R>(&self, settings: &Settings, f: impl FnOnce(&ActionContext<'_>) -> R) -> R {
        self.run_with(settings, &|| true, f)
    }

    /// Runs `f` with a caller-supplied cancellation predicate.
    pub fn run_with<R>(
        &self,
        settings: &Settings,
        cancellation: &dyn Cancellation,
        f: impl FnOnce(&ActionContext<'_>) -> R,
    ) -> R {
        let ctx = ActionContext::new(self, self, self, cancellation, settings);
        f(&ctx)
    }

    fn integrate(&self, state: &mut SimState, duration: Duration) {
        state.now += duration;
        if self.kinematics.frozen {
            return;
        }
        let distance = self.kinematics.walk_speed * duration.as_secs_f64();
        let left = state.held.iter().any(|key| key.as_str() == "left");
        let right = state.held.iter().any(|key| key.as_str() == "right");
        match (left, right) {
            (true, false) => state.position.x -= distance,
            (false, true) => state.position.x += distance,
            _ => {}
        }
    }

    fn is_held(state: &SimState, name: &str) -> bool {
        state.held.iter().any(|key| key.as_str() == name)
    }
}

impl InputDriver for SimWorld {
    fn press(&self, key: &Key, spec: PressSpec) {
        let mut state = self.state();
        state.events.push(InputEvent::Press {
            key: key.clone(),
            spec,
        });
        if !self.kinematics.frozen && *key == self.kinematics.jump_key {
            let jumps = f64::from(spec.count);
            if Self::is_held(&state, "up") {
                state.position.y -= self.kinematics.rise_per_jump * jumps;
            } else if Self::is_held(&state, "down") {
                state.position.y += self.kinematics.drop_per_jump * jumps;
            }
        }
        self.integrate(&mut state, spec.total_duration());
    }

    fn key_down(&self, key: &Key) {
        let mut state = self.state();
        state.events.push(InputEvent::Down(key.clone()));
        if !state.held.contains(key) {
            state.held.push(key.clone());
        }
    }

    fn key_up(&self, key: &Key) {
        let mut state = self.state();
        state.events.push(InputEvent::Up(key.clone()));
        state.held.retain(|held| held != key);
        if !self.kinematics.frozen {
            let slide = self.kinematics.walk_speed * self.kinematics.slide.as_secs_f64();
            match key.as_str() {
                "left" => state.position.x -= slide,
                "right" => state.position.x += slide,
                _ => {}
            }
        }
    }
}

impl PositionSource for SimWorld {
    fn current(&self) -> Position {
        let mut state = self.state();
        state.position_reads += 1;
        state.position
    }
}

impl Clock for SimWorld {
    fn now(&self) -> Timestamp {
        SimWorld::now(self)
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_arrow_moves_while_time_passes() {
        let world = SimWorld::new(Position::new(0.5, 0.5)).with_walk_speed(0.2);
        world.key_down(&Key::from("right"));
        world.advance(Duration::from_millis(500));
        world.key_up(&Key::from("right"));
        world.advance(Duration::from_millis(500));

        assert!((world.peek_position().x - 0.6).abs() < 1e-9);
        assert!(world.held_keys().is_empty());
    }

    #[test]
    fn jumps_move_vertically_only_with_arrow_held() {
        let world = SimWorld::new(Position::new(0.5, 0.5)).with_vertical_step(0.1, 0.05);
        let space = Key::from("space");

        world.press(&space, PressSpec::times(1));
        assert_eq!(world.peek_position().y, 0.5);

        world.key_down(&Key::from("up"));
        world.press(&space, PressSpec::times(1));
        world.key_up(&Key::from("up"));
        assert!((world.peek_position().y - 0.4).abs() < 1e-9);

        world.key_down(&Key::from("down"));
        world.press(&space, PressSpec::times(2));
        world.key_up(&Key::from("down"));
        assert!((world.peek_position().y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn presses_advance_the_clock() {
        let world = SimWorld::new(Position::default());
        world.press(&Key::from("x"), PressSpec::times(4));
        assert_eq!(
            world.now().since_origin(),
            PressSpec::times(4).total_duration()
        );
    }

    #[test]
    fn frozen_world_records_but_never_moves() {
        let world = SimWorld::new(Position::new(0.3, 0.3)).frozen();
        world.key_down(&Key::from("left"));
        world.advance(Duration::from_secs(3));
        world.key_up(&Key::from("left"));

        assert_eq!(world.peek_position(), Position::new(0.3, 0.3));
        assert_eq!(
            world.events(),
            vec![InputEvent::down("left"), InputEvent::up("left")]
        );
    }
}
