use crate::{Frame, StepReport};
use anyhow::Result;

/// Condition of a single cell during one generation.
///
/// A state is never mutated while other cells may read it: the simulation
/// computes the next state of every cell from the current ones and only then
/// replaces them all. New automaton rules are added as new implementations
/// of this trait.
pub trait CellState: Clone {
    /// Reports the observable value of the state.
    ///
    /// Neighbors are counted and cells are drawn based on this value.
    fn is_alive(&self) -> bool;

    /// Computes the state of the cell for the next generation.
    ///
    /// # Parameters
    /// * `neighbors` - States of the resolved neighbors as of the current
    ///   generation. Cells on the edges of a bounded field receive fewer
    ///   states; nothing is padded in for the missing ones.
    ///
    /// # Returns
    /// The state for the next generation.
    fn next<'a, I>(&self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a;
}

/// Output boundary of a running simulation.
///
/// Implementations receive a [`Frame`] between generations and never observe
/// a partially computed generation.
pub trait Renderer {
    /// Draws one generation.
    ///
    /// # Errors
    ///
    /// Any error aborts the run loop and is returned to its caller.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Receives per-step diagnostics when the run loop is in debug mode.
    ///
    /// The default implementation prints them to stdout.
    fn report(&mut self, report: &StepReport) {
        println!(
            "Generation {}: population {}, stepped in {:.3} ms",
            report.generation,
            report.population,
            report.elapsed.as_secs_f64() * 1e3
        );
    }
}
