use command_core::{ActionContext, Command, ConfigError, Direction, Status};

use crate::movement::Moves;

/// Performs a flash jump in the given direction.
#[derive(Clone, Debug)]
pub struct FlashJump {
    direction: Direction,
    moves: Moves,
}

impl FlashJump {
    pub fn new(direction: Direction, moves: Moves) -> Self {
        Self { direction, moves }
    }

    /// Builds the command from an unvalidated direction argument.
    pub fn parse(direction: &str, moves: Moves) -> Result<Self, ConfigError> {
        Ok(Self::new(Direction::parse_arrow(direction)?, moves))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Command for FlashJump {
    fn name(&self) -> &'static str {
        "flash_jump"
    }

    fn execute(&mut self, ctx: &ActionContext<'_>) -> Status {
        if !ctx.is_running() {
            return Status::Cancelled;
        }
        self.moves.flash_jump(ctx, self.direction);
        Status::Performed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_arrow() {
        for raw in ["left", "right", "up", "down"] {
            assert!(FlashJump::parse(raw, Moves::default()).is_ok());
        }
    }

    #[test]
    fn rejects_diagonal() {
        let err = FlashJump::parse("diagonal", Moves::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDirection { .. }));
    }
}
