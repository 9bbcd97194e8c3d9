//! Literal patterns that are available without any file I/O.

use super::Pattern;
use crate::Coordinate;

/// Names of the built-in patterns and their constructors.
pub const BUILTIN_PATTERNS: &[(&str, fn() -> Pattern)] = &[
    ("glider", Pattern::glider),
    ("pulsar", Pattern::pulsar),
    ("clover_leaf", Pattern::clover_leaf),
    ("clover_leaf_interchange", Pattern::clover_leaf_interchange),
];

const GLIDER: [(i64, i64); 5] = [(0, 2), (1, 0), (2, 1), (1, 2), (2, 2)];

#[rustfmt::skip]
const PULSAR: [(i64, i64); 48] = [
    (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
    (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
    (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
    (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
    (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
    (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
    (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
    (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
];

#[rustfmt::skip]
const CLOVER_LEAF: [(i64, i64); 40] = [
    (3, 0), (5, 0),
    (1, 1), (2, 1), (3, 1), (5, 1), (6, 1), (7, 1),
    (0, 2), (4, 2), (8, 2),
    (0, 3), (2, 3), (6, 3), (8, 3),
    (1, 4), (2, 4), (4, 4), (6, 4), (7, 4),
    (1, 6), (2, 6), (4, 6), (6, 6), (7, 6),
    (0, 7), (2, 7), (6, 7), (8, 7),
    (0, 8), (4, 8), (8, 8),
    (1, 9), (2, 9), (3, 9), (5, 9), (6, 9), (7, 9),
    (3, 10), (5, 10),
];

#[rustfmt::skip]
const CLOVER_LEAF_INTERCHANGE: [(i64, i64); 56] = [
    (4, 0), (8, 0),
    (3, 1), (5, 1), (7, 1), (9, 1),
    (3, 2), (5, 2), (7, 2), (9, 2),
    (1, 3), (2, 3), (5, 3), (7, 3), (10, 3), (11, 3),
    (0, 4), (5, 4), (7, 4), (12, 4),
    (1, 5), (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5), (11, 5),
    (1, 7), (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7), (11, 7),
    (0, 8), (5, 8), (7, 8), (12, 8),
    (1, 9), (2, 9), (5, 9), (7, 9), (10, 9), (11, 9),
    (3, 10), (5, 10), (7, 10), (9, 10),
    (3, 11), (5, 11), (7, 11), (9, 11),
    (4, 12), (8, 12),
];

impl Pattern {
    fn from_literal(xmax: u32, ymax: u32, cells: &[(i64, i64)]) -> Self {
        let live = cells.iter().copied().map(Coordinate::from);
        Self::new(xmax, ymax, live).expect("built-in patterns fit their bounds")
    }

    /// The smallest spaceship, travelling diagonally by one cell every four
    /// generations.
    pub fn glider() -> Self {
        Self::from_literal(2, 2, &GLIDER)
    }

    /// A period 3 oscillator.
    pub fn pulsar() -> Self {
        Self::from_literal(12, 12, &PULSAR)
    }

    /// A period 4 oscillator.
    pub fn clover_leaf() -> Self {
        Self::from_literal(8, 10, &CLOVER_LEAF)
    }

    pub fn clover_leaf_interchange() -> Self {
        Self::from_literal(12, 12, &CLOVER_LEAF_INTERCHANGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_fit_their_bounds() {
        for (name, build) in BUILTIN_PATTERNS {
            let pattern = build();
            let expected = match *name {
                "glider" => GLIDER.len(),
                "pulsar" => PULSAR.len(),
                "clover_leaf" => CLOVER_LEAF.len(),
                "clover_leaf_interchange" => CLOVER_LEAF_INTERCHANGE.len(),
                _ => unreachable!(),
            };
            assert_eq!(pattern.population(), expected, "{}", name);
        }
    }

    #[test]
    fn test_glider_cells() {
        let cells: Vec<_> = Pattern::glider().live_cells().collect();
        let expected: Vec<Coordinate> = [(1i64, 0i64), (2, 1), (0, 2), (1, 2), (2, 2)]
            .into_iter()
            .map(Coordinate::from)
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_oscillators_are_symmetric() {
        for pattern in [Pattern::pulsar(), Pattern::clover_leaf_interchange()] {
            let (xmax, ymax) = (pattern.xmax() as i64, pattern.ymax() as i64);
            for c in pattern.live_cells() {
                assert!(pattern.is_alive(Coordinate::new(xmax - c.x, c.y)));
                assert!(pattern.is_alive(Coordinate::new(c.x, ymax - c.y)));
            }
        }
    }
}
