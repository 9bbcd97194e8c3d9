use crate::Coordinate;
use std::fmt;
use std::str::FromStr;

/// Describes how neighbor lookups behave at the bounds of the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Neighbors outside of the field are dropped, so cells on the edges
    /// have fewer neighbors.
    #[default]
    Bounded,
    /// Opposite bounds of the field are stitched together.
    Torus,
}

impl Topology {
    /// Translates `coord` by `offset` and maps the result onto the field
    /// spanned by `ORIGIN..=max`, or returns `None` if the target leaves it.
    pub fn translate(
        self,
        coord: Coordinate,
        offset: Coordinate,
        max: Coordinate,
    ) -> Option<Coordinate> {
        let target = coord + offset;
        match self {
            Topology::Bounded => target.is_within(max).then_some(target),
            Topology::Torus => Some(target.wrap(max)),
        }
    }
}

const MOORE: [Coordinate; 8] = [
    Coordinate::new(-1, -1),
    Coordinate::new(0, -1),
    Coordinate::new(1, -1),
    Coordinate::new(-1, 0),
    Coordinate::new(1, 0),
    Coordinate::new(-1, 1),
    Coordinate::new(0, 1),
    Coordinate::new(1, 1),
];

const VON_NEUMANN: [Coordinate; 4] = [
    Coordinate::new(0, -1),
    Coordinate::new(-1, 0),
    Coordinate::new(1, 0),
    Coordinate::new(0, 1),
];

/// A named, ordered set of relative offsets that defines which cells
/// influence each other.
///
/// The offsets are static and shared by every cell, they never depend on the
/// state of the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Neighborhood {
    /// The 8 orthogonally and diagonally adjacent cells.
    #[default]
    Moore,
    /// The 4 orthogonally adjacent cells.
    VonNeumann,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 2] = [Neighborhood::Moore, Neighborhood::VonNeumann];

    pub fn name(self) -> &'static str {
        match self {
            Neighborhood::Moore => "moore",
            Neighborhood::VonNeumann => "von-neumann",
        }
    }

    /// Offsets in row-major order.
    pub fn offsets(self) -> &'static [Coordinate] {
        match self {
            Neighborhood::Moore => &MOORE,
            Neighborhood::VonNeumann => &VON_NEUMANN,
        }
    }

    /// Resolves the neighbors of `coord` on the field spanned by
    /// `ORIGIN..=max`.
    ///
    /// With [`Topology::Bounded`] offsets that fall outside the field are
    /// filtered out, so the result may be shorter than [`Self::offsets`].
    /// With [`Topology::Torus`] every offset yields a neighbor; on fields
    /// narrower than 3 cells the same coordinate may appear more than once.
    pub fn resolve(
        self,
        coord: Coordinate,
        topology: Topology,
        max: Coordinate,
    ) -> Vec<Coordinate> {
        self.offsets()
            .iter()
            .filter_map(|&offset| topology.translate(coord, offset, max))
            .collect()
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Neighborhood {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "moore" => Ok(Neighborhood::Moore),
            "von-neumann" | "vonneumann" => Ok(Neighborhood::VonNeumann),
            _ => Err(crate::Error::InvalidConfig(format!(
                "unknown neighborhood \"{}\"",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_exclude_origin_and_are_unique() {
        for neighborhood in Neighborhood::ALL {
            let offsets = neighborhood.offsets();
            assert!(!offsets.contains(&Coordinate::ORIGIN));
            for (i, a) in offsets.iter().enumerate() {
                assert!(!offsets[i + 1..].contains(a), "{} repeats {}", neighborhood, a);
            }
        }
        assert_eq!(Neighborhood::Moore.offsets().len(), 8);
        assert_eq!(Neighborhood::VonNeumann.offsets().len(), 4);
    }

    #[test]
    fn test_bounded_corner_has_three_moore_neighbors() {
        let max = Coordinate::new(5, 5);
        let neighbors = Neighborhood::Moore.resolve(Coordinate::ORIGIN, Topology::Bounded, max);
        assert_eq!(
            neighbors,
            vec![
                Coordinate::new(1, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_bounded_interior_keeps_all_offsets() {
        let max = Coordinate::new(5, 5);
        let center = Coordinate::new(2, 3);
        let neighbors = Neighborhood::Moore.resolve(center, Topology::Bounded, max);
        assert_eq!(neighbors.len(), 8);
        assert_eq!(neighbors[0], Coordinate::new(1, 2));
        assert_eq!(neighbors[7], Coordinate::new(3, 4));
    }

    #[test]
    fn test_torus_corner_wraps() {
        let max = Coordinate::new(4, 4);
        let neighbors = Neighborhood::VonNeumann.resolve(Coordinate::ORIGIN, Topology::Torus, max);
        assert_eq!(
            neighbors,
            vec![
                Coordinate::new(0, 4),
                Coordinate::new(4, 0),
                Coordinate::new(1, 0),
                Coordinate::new(0, 1)
            ]
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Moore".parse::<Neighborhood>().unwrap(), Neighborhood::Moore);
        assert_eq!(
            "von_neumann".parse::<Neighborhood>().unwrap(),
            Neighborhood::VonNeumann
        );
        assert!("hex".parse::<Neighborhood>().is_err());
    }
}
