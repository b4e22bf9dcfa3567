//! Closed-loop position correction.
//!
//! The controller nudges the character toward a fixed target using only coarse
//! moves: holding an arrow key while re-sampling the tracked position, and
//! discrete vertical traversals. Horizontal and vertical corrections alternate
//! until the position is within `adjust_tolerance`, the step budget runs out or
//! the run flag is cleared.
//!
//! Convergence is not guaranteed. Callers inspect [`ConvergeReport`] and decide
//! whether to retry with a fresh controller.

use crate::context::ActionContext;
use crate::direction::{Direction, HorizontalDirection};
use crate::position::Position;

/// Class-specific vertical movement used by the vertical correction phase.
pub trait Traversal {
    /// One bounded upward traversal (jump and ascend).
    fn ascend(&self, ctx: &ActionContext<'_>);

    /// One controlled descent through the current platform.
    fn descend(&self, ctx: &ActionContext<'_>);
}

impl<T: Traversal + ?Sized> Traversal for &T {
    fn ascend(&self, ctx: &ActionContext<'_>) {
        (**self).ascend(ctx)
    }

    fn descend(&self, ctx: &ActionContext<'_>) {
        (**self).descend(ctx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn flip(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// One corrective move that consumed a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Correction {
    pub axis: Axis,
    pub direction: Direction,
    /// Position samples taken while the key was held (zero for vertical moves).
    pub samples: u32,
}

/// Why the correction loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConvergeOutcome {
    /// Final error is within `adjust_tolerance`.
    Converged,
    /// The step budget ran out with the error still above tolerance.
    StepsExhausted,
    /// The run flag was cleared before convergence.
    Cancelled,
}

/// Post-condition of a [`PositionFeedbackController::converge`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergeReport {
    pub outcome: ConvergeOutcome,
    pub initial_error: f64,
    pub final_error: f64,
    pub remaining_steps: u32,
    pub corrections: Vec<Correction>,
}

impl ConvergeReport {
    pub fn steps_used(&self) -> u32 {
        self.corrections.len() as u32
    }

    pub fn is_converged(&self) -> bool {
        self.outcome == ConvergeOutcome::Converged
    }
}

/// Converges the tracked position onto one target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFeedbackController {
    target: Position,
    max_steps: u32,
}

impl PositionFeedbackController {
    pub fn new(target: Position, max_steps: u32) -> Self {
        Self { target, max_steps }
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Runs the alternating correction loop.
    ///
    /// Each horizontal or vertical move consumes one step. A phase whose axis is
    /// already within the per-axis threshold does nothing but still hands over
    /// to the other axis.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(target_x = self.target.x, target_y = self.target.y, max_steps = self.max_steps)
    )]
    pub fn converge(&self, ctx: &ActionContext<'_>, traversal: &dyn Traversal) -> ConvergeReport {
        let tolerance = ctx.settings().adjust_tolerance;
        let threshold = ctx.settings().axis_threshold();

        let initial_error = ctx.position().distance(self.target);
        let mut error = initial_error;
        let mut remaining = self.max_steps;
        let mut axis = Axis::Horizontal;
        let mut corrections = Vec::new();

        while ctx.is_running() && remaining > 0 && error > tolerance {
            let correction = match axis {
                Axis::Horizontal => {
                    let dx = self.target.x - ctx.position().x;
                    (dx.abs() > threshold).then(|| self.hold_toward(ctx, dx, threshold))
                }
                Axis::Vertical => {
                    let dy = self.target.y - ctx.position().y;
                    (dy.abs() > threshold).then(|| Self::traverse(ctx, traversal, dy))
                }
            };

            if let Some(correction) = correction {
                remaining -= 1;
                tracing::debug!(?correction, remaining, "correction applied");
                corrections.push(correction);
            }

            error = ctx.position().distance(self.target);
            axis = axis.flip();
        }

        let outcome = if error <= tolerance {
            ConvergeOutcome::Converged
        } else if !ctx.is_running() {
            ConvergeOutcome::Cancelled
        } else {
            ConvergeOutcome::StepsExhausted
        };

        match outcome {
            ConvergeOutcome::StepsExhausted => tracing::warn!(
                final_error = error,
                tolerance,
                "adjustment exhausted its step budget"
            ),
            _ => tracing::debug!(?outcome, final_error = error, "adjustment finished"),
        }

        ConvergeReport {
            outcome,
            initial_error,
            final_error: error,
            remaining_steps: remaining,
            corrections,
        }
    }

    /// Holds the arrow toward the target until the horizontal offset is within
    /// `threshold`, the sample cap is hit or the run flag clears.
    fn hold_toward(&self, ctx: &ActionContext<'_>, dx: f64, threshold: f64) -> Correction {
        let settings = ctx.settings();
        let direction = HorizontalDirection::toward(dx);
        let outside = |dx: f64| match direction {
            HorizontalDirection::Left => dx < -threshold,
            HorizontalDirection::Right => dx > threshold,
        };

        let hold = ctx.hold(direction.key());
        let mut dx = dx;
        let mut samples = 0;
        while ctx.is_running() && samples < settings.max_hold_polls && outside(dx) {
            ctx.sleep(settings.poll_interval);
            samples += 1;
            dx = self.target.x - ctx.position().x;
            tracing::trace!(samples, dx, "hold sample");
        }
        hold.release();

        Correction {
            axis: Axis::Horizontal,
            direction: direction.into(),
            samples,
        }
    }

    fn traverse(ctx: &ActionContext<'_>, traversal: &dyn Traversal, dy: f64) -> Correction {
        // Screen y grows downward: a negative offset means the target is above.
        let direction = if dy < 0.0 {
            traversal.ascend(ctx);
            Direction::Up
        } else {
            traversal.descend(ctx);
            Direction::Down
        };

        Correction {
            axis: Axis::Vertical,
            direction,
            samples: 0,
        }
    }
}
