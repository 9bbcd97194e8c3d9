#![warn(clippy::all)]

mod cell;
mod coordinate;
mod error;
mod grid;
mod pattern;
mod simulation;
mod state;
mod topology;
mod traits;

pub use cell::Cell;
pub use coordinate::Coordinate;
pub use error::{Error, Result};
pub use grid::Grid;
pub use pattern::{Pattern, PatternFormat, BUILTIN_PATTERNS, MAX_CELLS, MAX_EXTENT};
pub use simulation::{Frame, Phase, RunConfig, RunSummary, Simulation, StepReport};
pub use state::{ConwayState, LifeLikeState, LifeRule};
pub use topology::{Neighborhood, Topology};
pub use traits::{CellState, Renderer};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
