//! Arrow directions accepted by movement and facing arguments.

use std::str::FromStr;

use crate::error::ConfigError;
use crate::input::Key;

/// One of the four arrow keys.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    const ALLOWED: &'static str = "left, right, up, down";

    /// Validates a direction argument against all four arrows.
    pub fn parse_arrow(value: &str) -> Result<Self, ConfigError> {
        Self::from_str(value.trim()).map_err(|_| ConfigError::InvalidDirection {
            value: value.to_string(),
            allowed: Self::ALLOWED,
        })
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The arrow key that moves the character this way.
    pub fn key(self) -> Key {
        Key::from(self.as_ref())
    }
}

/// The horizontal-only subset used for facing before a directional cast.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HorizontalDirection {
    Left,
    Right,
}

impl HorizontalDirection {
    const ALLOWED: &'static str = "left, right";

    /// Validates a direction argument against `left` and `right` only.
    pub fn parse_arrow(value: &str) -> Result<Self, ConfigError> {
        Self::from_str(value.trim()).map_err(|_| ConfigError::InvalidDirection {
            value: value.to_string(),
            allowed: Self::ALLOWED,
        })
    }

    /// Direction of travel for a signed horizontal offset. Zero maps to right.
    pub fn toward(dx: f64) -> Self {
        if dx < 0.0 {
            HorizontalDirection::Left
        } else {
            HorizontalDirection::Right
        }
    }

    pub fn key(self) -> Key {
        Direction::from(self).key()
    }
}

impl From<HorizontalDirection> for Direction {
    fn from(value: HorizontalDirection) -> Self {
        match value {
            HorizontalDirection::Left => Direction::Left,
            HorizontalDirection::Right => Direction::Right,
        }
    }
}
