use command_core::{
    ActionContext, Command, ConvergeOutcome, ConvergeReport, Position,
    PositionFeedbackController, Status,
};

use crate::movement::Moves;

/// Fine-tunes the character position using small movements.
#[derive(Clone, Debug)]
pub struct Adjust {
    controller: PositionFeedbackController,
    moves: Moves,
    last_report: Option<ConvergeReport>,
}

impl Adjust {
    pub fn new(target: Position, max_steps: u32, moves: Moves) -> Self {
        Self {
            controller: PositionFeedbackController::new(target, max_steps),
            moves,
            last_report: None,
        }
    }

    pub fn target(&self) -> Position {
        self.controller.target()
    }

    pub fn max_steps(&self) -> u32 {
        self.controller.max_steps()
    }

    /// Report of the most recent invocation, for callers deciding on a retry.
    pub fn last_report(&self) -> Option<&ConvergeReport> {
        self.last_report.as_ref()
    }
}

impl Command for Adjust {
    fn name(&self) -> &'static str {
        "adjust"
    }

    fn execute(&mut self, ctx: &ActionContext<'_>) -> Status {
        let report = self.controller.converge(ctx, &self.moves);
        tracing::info!(
            outcome = ?report.outcome,
            steps = report.steps_used(),
            final_error = report.final_error,
            "adjust finished"
        );

        let status = match report.outcome {
            ConvergeOutcome::Cancelled => Status::Cancelled,
            _ if report.corrections.is_empty() => Status::Skipped,
            _ => Status::Performed,
        };
        self.last_report = Some(report);
        status
    }
}

#[cfg(test)]
mod tests {
    use command_core::Settings;
    use command_core::mock::SimWorld;

    use super::*;

    #[test]
    fn reports_outcome_of_last_invocation() {
        let world = SimWorld::new(Position::new(0.4, 0.5));
        let settings = Settings::default();
        let mut adjust = Adjust::new(Position::new(0.45, 0.5), 5, Moves::default());
        assert!(adjust.last_report().is_none());

        let status = world.run(&settings, |ctx| adjust.execute(ctx));

        assert_eq!(status, Status::Performed);
        let report = adjust.last_report().unwrap();
        assert!(report.is_converged());
        assert!(report.final_error <= settings.adjust_tolerance);
    }

    #[test]
    fn already_in_place_is_skipped() {
        let world = SimWorld::new(Position::new(0.45, 0.5));
        let settings = Settings::default();
        let mut adjust = Adjust::new(Position::new(0.45, 0.5), 5, Moves::default());

        let status = world.run(&settings, |ctx| adjust.execute(ctx));

        assert_eq!(status, Status::Skipped);
        assert!(world.events().is_empty());
    }
}
