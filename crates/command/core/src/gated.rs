//! Cooldown-gated casts and repeated-attack bursts.
//!
//! Every timed ability of a command book is a [`GatedAbility`]: a key, a press
//! count, its own [`CooldownTimer`] and an optional facing. A
//! [`CooldownGatedAction`] owns one or more of them (a combined buff command
//! gates several) and casts whichever are due on each tick.

use std::time::Duration;

use crate::command::{Command, Status};
use crate::context::ActionContext;
use crate::cooldown::CooldownTimer;
use crate::direction::HorizontalDirection;
use crate::heuristic::resolve_direction;
use crate::input::{Key, PressSpec};

/// Whether an ability turns the character before casting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    /// Cast in place without a directional tap.
    Unchanged,
    /// Tap the given direction first, or pick one from the current position
    /// when `None`.
    Toward(Option<HorizontalDirection>),
}

/// One re-triggerable ability.
#[derive(Clone, Debug)]
pub struct GatedAbility {
    name: &'static str,
    key: Key,
    presses: u32,
    timer: CooldownTimer,
    facing: Facing,
}

impl GatedAbility {
    pub fn new(name: &'static str, key: Key, presses: u32, interval: Duration) -> Self {
        Self {
            name,
            key,
            presses,
            timer: CooldownTimer::new(interval),
            facing: Facing::Unchanged,
        }
    }

    /// Turns before casting, toward `explicit` or the screen center.
    pub fn facing(mut self, explicit: Option<HorizontalDirection>) -> Self {
        self.facing = Facing::Toward(explicit);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn presses(&self) -> u32 {
        self.presses
    }

    pub fn timer(&self) -> &CooldownTimer {
        &self.timer
    }

    pub fn facing_mode(&self) -> Facing {
        self.facing
    }

    fn cast(&mut self, ctx: &ActionContext<'_>, now: crate::time::Timestamp) {
        if let Facing::Toward(explicit) = self.facing {
            let direction = resolve_direction(explicit, ctx.position().x);
            tracing::debug!(ability = self.name, %direction, "facing before cast");
            ctx.press(&direction.key(), PressSpec::tap());
        }
        ctx.press(&self.key, PressSpec::times(self.presses));
        self.timer.mark_cast(now);
    }
}

/// A command that casts its abilities whenever their cooldowns allow.
#[derive(Clone, Debug)]
pub struct CooldownGatedAction {
    name: &'static str,
    abilities: Vec<GatedAbility>,
}

impl CooldownGatedAction {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            abilities: Vec::new(),
        }
    }

    pub fn single(name: &'static str, ability: GatedAbility) -> Self {
        Self::new(name).with_ability(ability)
    }

    pub fn with_ability(mut self, ability: GatedAbility) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn abilities(&self) -> &[GatedAbility] {
        &self.abilities
    }

    pub fn ability(&self, name: &str) -> Option<&GatedAbility> {
        self.abilities.iter().find(|ability| ability.name == name)
    }

    /// Casts every ability that is off cooldown and returns how many were cast.
    ///
    /// Abilities that are not ready are skipped without touching their timers.
    #[tracing::instrument(level = "debug", skip_all, fields(action = self.name))]
    pub fn tick(&mut self, ctx: &ActionContext<'_>) -> usize {
        let now = ctx.now();
        let mut casts = 0;

        for ability in &mut self.abilities {
            if !ctx.is_running() {
                break;
            }
            if !ability.timer.is_ready(now) {
                tracing::trace!(
                    ability = ability.name,
                    remaining = ?ability.timer.remaining(now),
                    "on cooldown"
                );
                continue;
            }

            ability.cast(ctx, now);
            casts += 1;
            tracing::debug!(ability = ability.name, presses = ability.presses, "cast");
        }

        casts
    }
}

impl Command for CooldownGatedAction {
    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&mut self, ctx: &ActionContext<'_>) -> Status {
        match self.tick(ctx) {
            0 if !ctx.is_running() => Status::Cancelled,
            0 => Status::Skipped,
            _ => Status::Performed,
        }
    }
}

/// Pauses around an attack burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurstTiming {
    /// Pause before the first press.
    pub lead_in: Duration,
    /// Release time between attack presses.
    pub up_time: Duration,
    /// Attack counts above this get the longer trailing pause.
    pub heavy_threshold: u32,
    pub heavy_pause: Duration,
    pub light_pause: Duration,
}

impl BurstTiming {
    /// Recovery pause after a burst of `attacks` presses per repetition.
    pub fn trailing_pause(&self, attacks: u32) -> Duration {
        if attacks > self.heavy_threshold {
            self.heavy_pause
        } else {
            self.light_pause
        }
    }
}

impl Default for BurstTiming {
    fn default() -> Self {
        Self {
            lead_in: Duration::from_millis(50),
            up_time: Duration::from_millis(50),
            heavy_threshold: 2,
            heavy_pause: Duration::from_millis(300),
            light_pause: Duration::from_millis(200),
        }
    }
}

/// Spams an attack key on the spot, ungated and without facing.
#[derive(Clone, Debug)]
pub struct AttackBurst {
    name: &'static str,
    key: Key,
    attacks: u32,
    repetitions: u32,
    timing: BurstTiming,
}

impl AttackBurst {
    pub fn new(name: &'static str, key: Key, attacks: u32, repetitions: u32) -> Self {
        Self {
            name,
            key,
            attacks,
            repetitions,
            timing: BurstTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: BurstTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn attacks(&self) -> u32 {
        self.attacks
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn timing(&self) -> &BurstTiming {
        &self.timing
    }
}

impl Command for AttackBurst {
    fn name(&self) -> &'static str {
        self.name
    }

    fn execute(&mut self, ctx: &ActionContext<'_>) -> Status {
        ctx.sleep(self.timing.lead_in);

        let spec = PressSpec::times(self.attacks).with_up_time(self.timing.up_time);
        let mut pressed = false;
        for _ in 0..self.repetitions {
            if !ctx.is_running() {
                return Status::Cancelled;
            }
            if self.attacks > 0 {
                ctx.press(&self.key, spec);
                pressed = true;
            }
        }

        ctx.sleep(self.timing.trailing_pause(self.attacks));
        if pressed {
            Status::Performed
        } else {
            Status::Skipped
        }
    }
}
