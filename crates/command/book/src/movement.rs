//! Flash-jump based movement.
//!
//! Angelic Buster moves with a double flash jump. The same primitives serve
//! the fine-adjustment controller as its vertical traversal and the coarse
//! movement step used when walking a route.

use std::time::Duration;

use command_core::{ActionContext, Direction, Key, Position, PressSpec, Traversal};
use rand::Rng;

const FLASH_JUMP_WINDUP: Duration = Duration::from_millis(100);
const FLASH_JUMP_RECOVERY: Duration = Duration::from_millis(500);
const DESCENT_DOWN_TIME: Duration = Duration::from_millis(100);
const DESCENT_JUMPS: u32 = 3;

/// Movement primitives bound to the jump keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Moves {
    jump: Key,
    flash_jump: Key,
}

impl Moves {
    pub fn new(jump: Key, flash_jump: Key) -> Self {
        Self { jump, flash_jump }
    }

    pub fn from_bindings(bindings: &crate::KeyBindings) -> Self {
        Self::new(bindings.jump.clone(), bindings.flash_jump.clone())
    }

    /// Holds `direction`, double flash jumps, then lets the landing settle.
    pub fn flash_jump(&self, ctx: &ActionContext<'_>, direction: Direction) {
        tracing::debug!(%direction, "flash jump");
        let hold = ctx.hold(direction.key());
        ctx.sleep(FLASH_JUMP_WINDUP);
        ctx.press(&self.flash_jump, PressSpec::times(1));
        ctx.press(&self.flash_jump, PressSpec::times(1));
        hold.release();
        ctx.sleep(FLASH_JUMP_RECOVERY);
    }

    /// Drops through the current platform.
    pub fn descend_through(&self, ctx: &ActionContext<'_>) {
        let settle = ctx.settings().settle_pause;
        let hold = ctx.hold(Direction::Down.key());
        ctx.sleep(settle);
        ctx.press(
            &self.jump,
            PressSpec::times(DESCENT_JUMPS).with_down_time(DESCENT_DOWN_TIME),
        );
        hold.release();
        ctx.sleep(settle);
    }

    /// Performs one coarse movement step in `direction` toward `target`.
    ///
    /// Horizontal steps double flash jump, vertical steps flash jump once.
    /// When the target is far away vertically, extra jumps are pressed first:
    /// three to drop down, one to gain height.
    pub fn step<R: Rng + ?Sized>(
        &self,
        ctx: &ActionContext<'_>,
        direction: Direction,
        target: Position,
        rng: &mut R,
    ) {
        let settings = ctx.settings();
        let presses = if direction.is_horizontal() { 2 } else { 1 };

        if settings.stage_fright && direction != Direction::Up && rng.gen_bool(0.75) {
            let pause = rng.gen_range(0.1..0.3);
            tracing::trace!(pause, "stage fright");
            ctx.sleep(Duration::from_secs_f64(pause));
        }

        let dy = target.y - ctx.position().y;
        if dy.abs() > settings.move_tolerance * 1.5 {
            match direction {
                Direction::Down => ctx.press(&self.jump, PressSpec::times(3)),
                Direction::Up => ctx.press(&self.jump, PressSpec::times(1)),
                Direction::Left | Direction::Right => {}
            }
        }
        ctx.press(&self.flash_jump, PressSpec::times(presses));
    }
}

impl Default for Moves {
    fn default() -> Self {
        Self::from_bindings(&crate::KeyBindings::default())
    }
}

impl Traversal for Moves {
    fn ascend(&self, ctx: &ActionContext<'_>) {
        self.flash_jump(ctx, Direction::Up);
    }

    fn descend(&self, ctx: &ActionContext<'_>) {
        self.descend_through(ctx);
    }
}

#[cfg(test)]
mod tests {
    use command_core::mock::{InputEvent, SimWorld};
    use command_core::Settings;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn flash_jump_holds_direction_around_both_jumps() {
        let world = SimWorld::new(Position::new(0.5, 0.5));
        let settings = Settings::default();

        world.run(&settings, |ctx| Moves::default().flash_jump(ctx, Direction::Left));

        assert_eq!(
            world.events(),
            vec![
                InputEvent::down("left"),
                InputEvent::press("space", PressSpec::times(1)),
                InputEvent::press("space", PressSpec::times(1)),
                InputEvent::up("left"),
            ]
        );
        // Wind-up, two presses and the landing recovery.
        let expected = FLASH_JUMP_WINDUP + PressSpec::times(1).total_duration() * 2 + FLASH_JUMP_RECOVERY;
        assert_eq!(world.now().since_origin(), expected);
    }

    #[test]
    fn descent_presses_jump_three_times_while_holding_down() {
        let world = SimWorld::new(Position::new(0.5, 0.5));
        let settings = Settings::default();

        world.run(&settings, |ctx| Moves::default().descend(ctx));

        assert_eq!(
            world.events(),
            vec![
                InputEvent::down("down"),
                InputEvent::press(
                    "space",
                    PressSpec::times(3).with_down_time(Duration::from_millis(100))
                ),
                InputEvent::up("down"),
            ]
        );
        assert!(world.peek_position().y > 0.5);
    }

    #[test]
    fn horizontal_step_double_jumps() {
        let world = SimWorld::new(Position::new(0.2, 0.5));
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(7);

        world.run(&settings, |ctx| {
            Moves::default().step(ctx, Direction::Right, Position::new(0.8, 0.5), &mut rng)
        });

        assert_eq!(
            world.events(),
            vec![InputEvent::press("space", PressSpec::times(2))]
        );
    }

    #[test]
    fn distant_vertical_targets_add_jumps() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(7);

        let world = SimWorld::new(Position::new(0.5, 0.2));
        world.run(&settings, |ctx| {
            Moves::default().step(ctx, Direction::Down, Position::new(0.5, 0.8), &mut rng)
        });
        assert_eq!(
            world.events(),
            vec![
                InputEvent::press("space", PressSpec::times(3)),
                InputEvent::press("space", PressSpec::times(1)),
            ]
        );

        let world = SimWorld::new(Position::new(0.5, 0.8));
        world.run(&settings, |ctx| {
            Moves::default().step(ctx, Direction::Up, Position::new(0.5, 0.2), &mut rng)
        });
        assert_eq!(
            world.events(),
            vec![
                InputEvent::press("space", PressSpec::times(1)),
                InputEvent::press("space", PressSpec::times(1)),
            ]
        );
    }

    #[test]
    fn nearby_vertical_target_skips_extra_jumps() {
        let world = SimWorld::new(Position::new(0.5, 0.5));
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(7);

        world.run(&settings, |ctx| {
            Moves::default().step(ctx, Direction::Down, Position::new(0.5, 0.6), &mut rng)
        });

        assert_eq!(
            world.events(),
            vec![InputEvent::press("space", PressSpec::times(1))]
        );
    }

    #[test]
    fn stage_fright_only_delays_never_adds_input() {
        let settings = Settings::default().with_stage_fright(true);
        let mut rng = StdRng::seed_from_u64(42);
        let world = SimWorld::new(Position::new(0.2, 0.5));

        for _ in 0..20 {
            world.run(&settings, |ctx| {
                Moves::default().step(ctx, Direction::Right, Position::new(0.8, 0.5), &mut rng)
            });
        }

        let presses = PressSpec::times(2).total_duration() * 20;
        let elapsed = world.now().since_origin();
        assert_eq!(world.events().len(), 20);
        assert!(elapsed > presses);
        assert!(elapsed <= presses + Duration::from_millis(300) * 20);
    }
}
