use crate::{CellState, Error, Result};
use std::fmt;
use std::str::FromStr;

/// The two-state cell of Conway's Game of Life (B3/S23).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConwayState(pub bool);

impl ConwayState {
    pub const ALIVE: Self = Self(true);
    pub const DEAD: Self = Self(false);
}

impl CellState for ConwayState {
    fn is_alive(&self) -> bool {
        self.0
    }

    fn next<'a, I>(&self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let alive = neighbors.into_iter().filter(|n| n.0).count();
        Self(matches!((self.0, alive), (true, 2) | (_, 3)))
    }
}

/// Birth and survival conditions of an outer-totalistic two-state rule.
///
/// Bit `n` of each mask is set when `n` live neighbors trigger the
/// transition, so only counts `0..=8` are representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LifeRule {
    birth: u16,
    survival: u16,
}

impl LifeRule {
    /// B3/S23
    pub const CONWAY: Self = Self {
        birth: 1 << 3,
        survival: 1 << 2 | 1 << 3,
    };

    /// Builds a rule from neighbor counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if any count exceeds 8.
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self> {
        let mask = |counts: &[u8]| {
            counts.iter().try_fold(0u16, |acc, &n| {
                if n > 8 {
                    Err(Error::format("rule", format!("neighbor count {} exceeds 8", n)))
                } else {
                    Ok(acc | 1 << n)
                }
            })
        };
        Ok(Self {
            birth: mask(birth)?,
            survival: mask(survival)?,
        })
    }

    /// Applies the rule to a cell with `alive_neighbors` live neighbors.
    pub fn next(&self, alive: bool, alive_neighbors: usize) -> bool {
        if alive_neighbors > 8 {
            return false;
        }
        let mask = if alive { self.survival } else { self.birth };
        mask & 1 << alive_neighbors != 0
    }

    fn counts(mask: u16) -> impl Iterator<Item = u8> {
        (0..=8).filter(move |n| mask & 1 << n != 0)
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl fmt::Display for LifeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for n in Self::counts(self.birth) {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in Self::counts(self.survival) {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

impl FromStr for LifeRule {
    type Err = Error;

    /// Parses `B3/S23` notation (case-insensitive, in either order) as well as
    /// the legacy `23/3` survival/birth notation.
    fn from_str(s: &str) -> Result<Self> {
        let digits = |part: &str| -> Result<Vec<u8>> {
            part.chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or_else(|| {
                            Error::format("rule", format!("unexpected '{}' in \"{}\"", c, s))
                        })
                })
                .collect()
        };

        let s = s.trim();
        let (left, right) = s
            .split_once('/')
            .ok_or_else(|| Error::format("rule", format!("missing '/' in \"{}\"", s)))?;

        let mut birth = None;
        let mut survival = None;
        for part in [left, right] {
            let mut chars = part.chars();
            match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => birth = Some(digits(chars.as_str())?),
                Some('S') => survival = Some(digits(chars.as_str())?),
                _ => {}
            }
        }

        match (birth, survival) {
            (Some(birth), Some(survival)) => Self::new(&birth, &survival),
            (None, None) => Self::new(&digits(right)?, &digits(left)?),
            _ => Err(Error::format(
                "rule",
                format!("mixed notations in \"{}\"", s),
            )),
        }
    }
}

/// A two-state cell that follows an arbitrary [`LifeRule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LifeLikeState {
    alive: bool,
    rule: LifeRule,
}

impl LifeLikeState {
    pub fn new(alive: bool, rule: LifeRule) -> Self {
        Self { alive, rule }
    }

    pub fn rule(&self) -> LifeRule {
        self.rule
    }
}

impl CellState for LifeLikeState {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn next<'a, I>(&self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let alive = neighbors.into_iter().filter(|n| n.alive).count();
        Self {
            alive: self.rule.next(self.alive, alive),
            rule: self.rule,
        }
    }
}
