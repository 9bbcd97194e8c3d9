//! Error types for term_automata.

use crate::Coordinate;
use thiserror::Error;

/// Errors reported by grids, simulations and pattern decoders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grid was accessed outside of its declared dimensions.
    #[error("coordinate {coord} is out of bounds {max}")]
    OutOfBounds {
        /// The rejected coordinate.
        coord: Coordinate,
        /// The largest coordinate of the grid.
        max: Coordinate,
    },

    /// Pattern or rule text could not be decoded.
    #[error("malformed {kind}: {reason}")]
    Format {
        /// What was being decoded, e.g. "RLE pattern".
        kind: &'static str,
        /// Human readable description of the problem.
        reason: String,
    },

    /// No built-in pattern has the requested name.
    #[error("unknown pattern \"{0}\"")]
    UnknownPattern(String),

    /// A configuration value was rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The simulation has stopped and accepts no further transitions.
    #[error("simulation has already stopped")]
    Stopped,
}

impl Error {
    pub(crate) fn format(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Format {
            kind,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
