use std::fmt;
use std::ops::Add;

/// A point on the integer lattice, used both as a grid key and as a
/// relative offset.
///
/// Offsetting a coordinate may produce values outside of any grid (including
/// negative ones). Such values must be filtered with [`Coordinate::is_within`]
/// (or wrapped with [`Coordinate::wrap`]) before they are used for lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    /// The top-left corner of every grid.
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Checks if the point lies in the inclusive rectangle spanned by
    /// [`Coordinate::ORIGIN`] and `max`.
    ///
    /// # Arguments
    ///
    /// * `max` - The largest coordinate that still belongs to the rectangle.
    ///
    /// # Returns
    ///
    /// `true` iff `0 <= x <= max.x` and `0 <= y <= max.y`.
    pub fn is_within(self, max: Coordinate) -> bool {
        (0..=max.x).contains(&self.x) && (0..=max.y).contains(&self.y)
    }

    /// Maps the point onto the inclusive rectangle `ORIGIN..=max` as if
    /// opposite edges were stitched together.
    ///
    /// `max` must not be negative in either axis.
    pub fn wrap(self, max: Coordinate) -> Self {
        Self {
            x: self.x.rem_euclid(max.x + 1),
            y: self.y.rem_euclid(max.y + 1),
        }
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_componentwise() {
        let a = Coordinate::new(3, -2);
        let b = Coordinate::new(-1, 5);
        assert_eq!(a + b, Coordinate::new(2, 3));
        assert_eq!(b + a, a + b);
    }

    #[test]
    fn test_is_within_matches_axis_ranges() {
        let max = Coordinate::new(4, 2);
        for x in -2..7 {
            for y in -2..5 {
                let expected = (0..=4).contains(&x) && (0..=2).contains(&y);
                assert_eq!(
                    Coordinate::new(x, y).is_within(max),
                    expected,
                    "({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_offset_then_contains() {
        let max = Coordinate::new(3, 3);
        let corner = Coordinate::new(3, 0);
        assert!(!(corner + Coordinate::new(1, 0)).is_within(max));
        assert!(!(corner + Coordinate::new(0, -1)).is_within(max));
        assert!((corner + Coordinate::new(-1, 1)).is_within(max));
    }

    #[test]
    fn test_wrap() {
        let max = Coordinate::new(4, 2);
        assert_eq!(Coordinate::new(-1, -1).wrap(max), Coordinate::new(4, 2));
        assert_eq!(Coordinate::new(5, 3).wrap(max), Coordinate::ORIGIN);
        assert_eq!(Coordinate::new(2, 1).wrap(max), Coordinate::new(2, 1));
    }
}
