use crate::{CellState, Coordinate, Neighborhood, Topology};

/// A unit of the simulated field.
///
/// The cell remembers which coordinates it reads its neighbors from. The
/// list is resolved once, against the bounds, neighborhood and topology the
/// cell is built for, and it holds lookup keys only: neighbor states always
/// come from the simulation that owns the cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell<S> {
    coord: Coordinate,
    state: S,
    neighbors: Vec<Coordinate>,
    /// Bounds, neighborhood and topology `neighbors` were resolved against.
    layout: (Coordinate, Neighborhood, Topology),
    /// Consecutive generations spent alive.
    age: u32,
}

impl<S: CellState> Cell<S> {
    /// Creates a cell and resolves its neighbors.
    ///
    /// # Arguments
    ///
    /// * `coord` - Position of the cell.
    /// * `state` - State of the cell in the current generation.
    /// * `neighborhood` - Offsets that define the neighbors.
    /// * `topology` - Edge behavior used while resolving the offsets.
    /// * `max` - Largest coordinate of the field the cell will live in.
    pub fn new(
        coord: Coordinate,
        state: S,
        neighborhood: Neighborhood,
        topology: Topology,
        max: Coordinate,
    ) -> Self {
        Self {
            coord,
            state,
            neighbors: neighborhood.resolve(coord, topology, max),
            layout: (max, neighborhood, topology),
            age: 0,
        }
    }

    /// Creates a cell with the Moore neighborhood on a bounded field.
    pub fn moore(coord: Coordinate, state: S, max: Coordinate) -> Self {
        Self::new(coord, state, Neighborhood::Moore, Topology::Bounded, max)
    }

    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Coordinates of the resolved neighbors, in the order of the
    /// neighborhood's offsets.
    pub fn neighbors(&self) -> &[Coordinate] {
        &self.neighbors
    }

    /// Number of consecutive generations the cell has been alive, zero for
    /// dead and newborn cells.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Resolves the neighbors again unless they were already resolved for
    /// the same field.
    pub(crate) fn rebind(
        &mut self,
        neighborhood: Neighborhood,
        topology: Topology,
        max: Coordinate,
    ) {
        if self.layout != (max, neighborhood, topology) {
            self.neighbors = neighborhood.resolve(self.coord, topology, max);
            self.layout = (max, neighborhood, topology);
        }
    }

    /// Publishes the state computed for the next generation.
    pub(crate) fn advance(&mut self, next: S) {
        self.age = match (self.state.is_alive(), next.is_alive()) {
            (true, true) => self.age.saturating_add(1),
            _ => 0,
        };
        self.state = next;
    }
}
