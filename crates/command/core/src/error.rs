//! Construction-time configuration errors.
//!
//! Commands validate their arguments when they are built. A command that fails
//! validation is never scheduled, so nothing in the runtime loops returns an
//! error: non-convergence and cancellation are reported as outcomes instead.

/// Errors raised while building a command or loading settings.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{value}' is not a valid direction (expected one of: {allowed})")]
    InvalidDirection {
        value: String,
        allowed: &'static str,
    },

    #[error("'{value}' is not a valid {name}: expected a non-negative integer")]
    InvalidCount { name: &'static str, value: String },

    #[error("'{value}' is not a valid {name} coordinate")]
    InvalidCoordinate { name: &'static str, value: String },

    #[error("{name} must be a positive finite number, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("{name} must be greater than zero")]
    InvalidTiming { name: &'static str },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("command '{command}' does not accept argument '{argument}'")]
    UnexpectedArgument { command: String, argument: String },

    #[error("command '{command}' requires argument '{argument}'")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },
}

/// Parses a count argument, rejecting negative and fractional values.
pub fn validate_nonnegative_int(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidCount {
            name,
            value: value.to_string(),
        })
}

/// Parses a target coordinate. Non-finite values are rejected.
pub fn validate_coordinate(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(ConfigError::InvalidCoordinate {
            name,
            value: value.to_string(),
        }),
    }
}
