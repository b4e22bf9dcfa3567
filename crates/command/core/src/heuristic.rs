//! Facing fallback for directional casts.

use crate::direction::HorizontalDirection;

/// Horizontal screen midpoint in normalized coordinates.
pub const SCREEN_MIDPOINT: f64 = 0.5;

/// Picks the facing for a directional cast.
///
/// An explicit direction always wins. Without one, the character turns toward
/// the screen center: left when it stands right of the midpoint, right
/// otherwise (including exactly on the midpoint).
pub fn resolve_direction(
    explicit: Option<HorizontalDirection>,
    current_x: f64,
) -> HorizontalDirection {
    match explicit {
        Some(direction) => direction,
        None if current_x > SCREEN_MIDPOINT => HorizontalDirection::Left,
        None => HorizontalDirection::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HorizontalDirection::{Left, Right};

    #[test]
    fn explicit_direction_wins() {
        assert_eq!(resolve_direction(Some(Left), 0.9), Left);
        assert_eq!(resolve_direction(Some(Right), 0.9), Right);
        assert_eq!(resolve_direction(Some(Left), 0.1), Left);
    }

    #[test]
    fn falls_back_toward_screen_center() {
        assert_eq!(resolve_direction(None, 0.9), Left);
        assert_eq!(resolve_direction(None, 0.1), Right);
    }

    #[test]
    fn midpoint_faces_right() {
        assert_eq!(resolve_direction(None, 0.5), Right);
    }
}
