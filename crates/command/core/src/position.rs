//! Normalized on-screen positions.

/// A point in normalized minimap coordinates. `x` grows to the right and `y`
/// grows downward; `0.5` is the horizontal midpoint of the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Live position estimate published by the tracking subsystem.
///
/// The estimate may change between any two calls; callers re-sample instead of
/// caching it.
pub trait PositionSource {
    fn current(&self) -> Position;
}

impl<T: PositionSource + ?Sized> PositionSource for &T {
    #[inline]
    fn current(&self) -> Position {
        (**self).current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.1, 0.2);
        let b = Position::new(0.4, 0.6);
        assert!((a.distance(b) - 0.5).abs() < 1e-12);
        assert_eq!(a.distance(a), 0.0);
    }
}
