use crate::{
    Cell, CellState, Coordinate, Error, Grid, Neighborhood, Pattern, Renderer, Result, Topology,
};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

/// Lifecycle of a [`Simulation`].
///
/// `Created -> Populating -> Running -> Stopped`. Once stopped, a simulation
/// accepts no further spawns or steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Created,
    Populating,
    Running,
    Stopped,
}

/// Options of [`Simulation::run`], validated at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    refresh_rate: u32,
    generations: u64,
    debug: bool,
    render: bool,
}

impl RunConfig {
    /// # Arguments
    ///
    /// * `refresh_rate` - Generations per second, must be positive.
    /// * `generations` - Number of generations to run for, `0` runs until
    ///   cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `refresh_rate` is zero.
    pub fn new(refresh_rate: u32, generations: u64) -> Result<Self> {
        if refresh_rate == 0 {
            return Err(Error::InvalidConfig(
                "refresh rate must be positive".to_string(),
            ));
        }
        Ok(Self {
            refresh_rate,
            generations,
            ..Self::default()
        })
    }

    /// Hands a [`StepReport`] to the renderer after every step.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Disabling rendering keeps the cadence but never calls
    /// [`Renderer::draw`].
    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    pub fn refresh_rate(&self) -> u32 {
        self.refresh_rate
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn render(&self) -> bool {
        self.render
    }

    /// Time between two generations.
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.refresh_rate
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 30,
            generations: 0,
            debug: false,
            render: true,
        }
    }
}

/// Everything a renderer needs to draw one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    pub generation: u64,
    /// The largest coordinate of the field.
    pub max: Coordinate,
    /// Live cells and their colors in row-major order.
    pub cells: Vec<(Coordinate, &'a str)>,
}

/// Diagnostics of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub population: usize,
    pub elapsed: Duration,
}

/// Outcome of [`Simulation::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps performed by this run.
    pub steps: u64,
    /// Whether the run ended because of cancellation rather than the
    /// generation limit.
    pub cancelled: bool,
    pub elapsed: Duration,
}

const DEFAULT_COLOR: &str = "white";

/// A population of cells on a bounded field, advanced one synchronous
/// generation at a time.
///
/// # Example
///
/// ```rust
/// use term_automata::{ConwayState, Coordinate, Pattern, Simulation};
///
/// let mut sim = Simulation::new(9, 9).unwrap();
/// sim.seed(&Pattern::glider(), Coordinate::new(1, 1), ConwayState).unwrap();
/// for _ in 0..4 {
///     sim.step().unwrap();
/// }
/// // the glider moved by one cell diagonally
/// assert!(sim.snapshot().is_alive(Coordinate::new(3, 4)));
/// assert_eq!(sim.population(), 5);
/// ```
pub struct Simulation<S> {
    cells: Grid<Option<Cell<S>>>,
    neighborhood: Neighborhood,
    topology: Topology,
    colors: Vec<String>,
    generation: u64,
    phase: Phase,
}

impl<S: CellState> Simulation<S> {
    /// Creates an empty simulation on the field `(0, 0)..=(xmax, ymax)` with
    /// the Moore neighborhood, bounded edges and a single-color palette.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the field is too large to be
    /// allocated.
    pub fn new(xmax: u32, ymax: u32) -> Result<Self> {
        Ok(Self {
            cells: Grid::from_fn(xmax, ymax, |_| None)?,
            neighborhood: Neighborhood::default(),
            topology: Topology::default(),
            colors: vec![DEFAULT_COLOR.to_string()],
            generation: 0,
            phase: Phase::Created,
        })
    }

    /// Cells spawned afterwards resolve their neighbors with `neighborhood`.
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self.rebind_all();
        self
    }

    /// Cells spawned afterwards resolve their neighbors with `topology`.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self.rebind_all();
        self
    }

    /// Replaces the palette. Colors are opaque identifiers handed to the
    /// renderer; an empty palette keeps the current one.
    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        if !colors.is_empty() {
            self.colors = colors;
        }
        self
    }

    fn rebind_all(&mut self) {
        let (neighborhood, topology, max) =
            (self.neighborhood, self.topology, self.cells.max());
        for y in 0..=max.y {
            for x in 0..=max.x {
                if let Ok(Some(cell)) = self.cells.get_mut(Coordinate::new(x, y)) {
                    cell.rebind(neighborhood, topology, max);
                }
            }
        }
    }

    pub fn xmax(&self) -> u32 {
        self.cells.xmax()
    }

    pub fn ymax(&self) -> u32 {
        self.cells.ymax()
    }

    /// The largest coordinate of the field.
    pub fn max(&self) -> Coordinate {
        self.cells.max()
    }

    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Number of generations computed since creation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the cell at `coord`, if one was spawned there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `coord` is outside of the field.
    pub fn cell(&self, coord: Coordinate) -> Result<Option<&Cell<S>>> {
        Ok(self.cells.get(coord)?.as_ref())
    }

    fn ensure_not_stopped(&self) -> Result<()> {
        if self.phase == Phase::Stopped {
            return Err(Error::Stopped);
        }
        Ok(())
    }

    /// Inserts a cell at its coordinate, replacing any previous occupant.
    ///
    /// If the cell was built for another field, neighborhood or topology, its
    /// neighbors are resolved again for this simulation.
    ///
    /// # Errors
    ///
    /// * [`Error::OutOfBounds`] if the cell lies outside of the field.
    /// * [`Error::Stopped`] if the simulation has stopped.
    pub fn spawn(&mut self, mut cell: Cell<S>) -> Result<()> {
        self.ensure_not_stopped()?;
        cell.rebind(self.neighborhood, self.topology, self.cells.max());
        self.cells.set(cell.coord(), Some(cell))?;
        if self.phase == Phase::Created {
            self.phase = Phase::Populating;
        }
        Ok(())
    }

    /// Spawns a fresh cell with `state` at `coord`.
    pub fn spawn_state(&mut self, coord: Coordinate, state: S) -> Result<()> {
        let cell = Cell::new(coord, state, self.neighborhood, self.topology, self.cells.max());
        self.spawn(cell)
    }

    /// Spawns a cell at every coordinate of the field.
    pub fn fill_with(&mut self, mut state: impl FnMut(Coordinate) -> S) -> Result<()> {
        for coord in self.cells.coordinates().collect::<Vec<_>>() {
            self.spawn_state(coord, state(coord))?;
        }
        Ok(())
    }

    /// Fills the whole field, placing `pattern` with its origin at `offset`.
    ///
    /// Every coordinate gets a cell: `make_state(true)` where the translated
    /// pattern is alive and `make_state(false)` elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] without touching the field if a live
    /// cell of the pattern would land outside of it.
    pub fn seed(
        &mut self,
        pattern: &Pattern,
        offset: Coordinate,
        make_state: impl Fn(bool) -> S,
    ) -> Result<()> {
        self.ensure_not_stopped()?;
        let max = self.cells.max();
        if let Some(coord) = pattern
            .live_cells()
            .map(|c| c + offset)
            .find(|c| !c.is_within(max))
        {
            return Err(Error::OutOfBounds { coord, max });
        }
        let origin = Coordinate::new(-offset.x, -offset.y);
        self.fill_with(|coord| make_state(pattern.is_alive(coord + origin)))
    }

    /// Advances every cell by one generation.
    ///
    /// Next states are computed from the current generation only and are
    /// published together once all of them are known, so the result does not
    /// depend on the order cells are visited in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stopped`] if the simulation has stopped.
    pub fn step(&mut self) -> Result<()> {
        self.ensure_not_stopped()?;
        let cells = &self.cells;
        let next: Vec<(Coordinate, S)> = cells
            .iter()
            .filter_map(|(coord, cell)| cell.as_ref().map(|cell| (coord, cell)))
            .map(|(coord, cell)| {
                let neighbors = cell
                    .neighbors()
                    .iter()
                    .filter_map(|&n| cells.get(n).ok().and_then(Option::as_ref))
                    .map(Cell::state);
                (coord, cell.state().next(neighbors))
            })
            .collect();

        for (coord, state) in next {
            if let Ok(Some(cell)) = self.cells.get_mut(coord) {
                cell.advance(state);
            }
        }
        self.generation += 1;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Stops the simulation for good.
    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }

    /// Counts live cells.
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.as_ref().is_some_and(|c| c.state().is_alive()))
            .count()
    }

    /// Iterates over live cells and their colors in row-major order.
    ///
    /// A cell's color is picked from the palette by its age: newborn cells
    /// use the first color and every survived generation moves one color
    /// further, up to the last one.
    pub fn live_cells(&self) -> impl Iterator<Item = (Coordinate, &str)> {
        let last = self.colors.len() - 1;
        self.cells.iter().filter_map(move |(coord, cell)| {
            let cell = cell.as_ref()?;
            if !cell.state().is_alive() {
                return None;
            }
            let color = &self.colors[(cell.age() as usize).min(last)];
            Some((coord, color.as_str()))
        })
    }

    /// Captures the current generation for a renderer.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            generation: self.generation,
            max: self.cells.max(),
            cells: self.live_cells().collect(),
        }
    }

    /// Converts the current generation into a pattern of the field's size.
    pub fn snapshot(&self) -> Pattern {
        Pattern::from_grid(
            self.cells
                .map(|_, cell| cell.as_ref().is_some_and(|c| c.state().is_alive())),
        )
    }

    /// Drives the generation loop.
    ///
    /// Steps are spaced by [`RunConfig::period`]; the first one happens
    /// right away. The loop ends after [`RunConfig::generations`] steps (if
    /// positive) or once `cancel` holds `true` or its sender is dropped.
    /// Cancellation is only observed between generations.
    ///
    /// When rendering is enabled, the renderer draws the initial generation
    /// and every generation after it. When debug is enabled, the renderer
    /// also receives a [`StepReport`] after each step.
    ///
    /// The simulation is [`Phase::Stopped`] afterwards, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation has already stopped or if the
    /// renderer fails.
    pub async fn run<R: Renderer + ?Sized>(
        &mut self,
        config: &RunConfig,
        renderer: &mut R,
        cancel: &mut watch::Receiver<bool>,
    ) -> anyhow::Result<RunSummary> {
        self.ensure_not_stopped()?;
        self.phase = Phase::Running;
        let result = self.run_inner(config, renderer, cancel).await;
        self.stop();
        result
    }

    async fn run_inner<R: Renderer + ?Sized>(
        &mut self,
        config: &RunConfig,
        renderer: &mut R,
        cancel: &mut watch::Receiver<bool>,
    ) -> anyhow::Result<RunSummary> {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(config.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if config.render() {
            renderer.draw(&self.frame())?;
        }

        let mut steps = 0;
        let mut cancelled = *cancel.borrow_and_update();
        while !cancelled && (config.generations() == 0 || steps < config.generations()) {
            tokio::select! {
                biased;
                changed = cancel.changed() => {
                    cancelled = changed.is_err() || *cancel.borrow_and_update();
                    continue;
                }
                _ = ticker.tick() => {}
            }

            let timer = Instant::now();
            self.step()?;
            steps += 1;
            if config.render() {
                renderer.draw(&self.frame())?;
            }
            if config.debug() {
                renderer.report(&StepReport {
                    generation: self.generation,
                    population: self.population(),
                    elapsed: timer.elapsed(),
                });
            }
        }

        Ok(RunSummary {
            steps,
            cancelled,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConwayState;

    fn alive(sim: &Simulation<ConwayState>) -> Vec<(i64, i64)> {
        sim.live_cells().map(|(c, _)| (c.x, c.y)).collect()
    }

    fn conway(xmax: u32, ymax: u32, live: &[(i64, i64)]) -> Simulation<ConwayState> {
        let mut sim = Simulation::new(xmax, ymax).unwrap();
        sim.fill_with(|c| ConwayState(live.contains(&(c.x, c.y)))).unwrap();
        sim
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut sim = conway(4, 4, &[(2, 2)]);
        sim.step().unwrap();
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.generation(), 1);
    }

    #[test]
    fn test_overpopulated_center_dies() {
        let all: Vec<_> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        let mut sim = conway(2, 2, &all);
        sim.step().unwrap();
        // corners have 3 live neighbors, edges 5, the center 8
        assert_eq!(alive(&sim), vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
    }

    #[test]
    fn test_block_in_tight_field_is_stable() {
        let block = [(0, 0), (1, 0), (0, 1), (1, 1)];
        let mut sim = conway(1, 1, &block);
        for _ in 0..3 {
            sim.step().unwrap();
            assert_eq!(alive(&sim), block.to_vec());
        }
    }

    #[test]
    fn test_update_is_synchronous() {
        // a blinker only oscillates if every cell sees the same generation
        let mut sim = conway(4, 4, &[(1, 2), (2, 2), (3, 2)]);
        sim.step().unwrap();
        assert_eq!(alive(&sim), vec![(2, 1), (2, 2), (2, 3)]);
        sim.step().unwrap();
        assert_eq!(alive(&sim), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_unpopulated_coordinates_are_not_neighbors() {
        let mut sim = Simulation::new(2, 2).unwrap();
        for x in 0..3 {
            sim.spawn_state(Coordinate::new(x, 0), ConwayState::ALIVE).unwrap();
        }
        sim.spawn_state(Coordinate::new(1, 1), ConwayState::DEAD).unwrap();
        sim.step().unwrap();
        // (1, 1) is born, (0, 1) and (2, 1) were never spawned
        assert_eq!(alive(&sim), vec![(1, 0), (1, 1)]);
        assert!(sim.cell(Coordinate::new(0, 1)).unwrap().is_none());
    }

    #[test]
    fn test_torus_blinker_wraps() {
        let mut sim = Simulation::new(4, 4)
            .unwrap()
            .with_topology(Topology::Torus);
        let line = [(4, 0), (0, 0), (1, 0)];
        sim.fill_with(|c| ConwayState(line.contains(&(c.x, c.y)))).unwrap();
        sim.step().unwrap();
        assert_eq!(alive(&sim), vec![(0, 0), (0, 1), (0, 4)]);
    }

    #[test]
    fn test_von_neumann_ignores_diagonals() {
        let diagonal = [(0, 0), (2, 0), (0, 2)];
        let mut moore = conway(2, 2, &diagonal);
        moore.step().unwrap();
        assert!(alive(&moore).contains(&(1, 1)));

        let mut von_neumann = Simulation::new(2, 2)
            .unwrap()
            .with_neighborhood(Neighborhood::VonNeumann);
        von_neumann
            .fill_with(|c| ConwayState(diagonal.contains(&(c.x, c.y))))
            .unwrap();
        von_neumann.step().unwrap();
        assert_eq!(von_neumann.population(), 0);
    }

    #[test]
    fn test_spawn_rebinds_foreign_cells() {
        let mut sim: Simulation<ConwayState> = Simulation::new(4, 4).unwrap();
        let cell = Cell::moore(Coordinate::new(2, 2), ConwayState::ALIVE, Coordinate::new(2, 2));
        assert_eq!(cell.neighbors().len(), 3);
        sim.spawn(cell).unwrap();
        let cell = sim.cell(Coordinate::new(2, 2)).unwrap().unwrap();
        assert_eq!(cell.neighbors().len(), 8);
    }

    #[test]
    fn test_spawn_overwrites_and_checks_bounds() {
        let mut sim = Simulation::new(2, 2).unwrap();
        assert_eq!(sim.phase(), Phase::Created);
        sim.spawn_state(Coordinate::new(1, 1), ConwayState::ALIVE).unwrap();
        assert_eq!(sim.phase(), Phase::Populating);
        sim.spawn_state(Coordinate::new(1, 1), ConwayState::DEAD).unwrap();
        assert_eq!(sim.population(), 0);

        assert!(matches!(
            sim.spawn_state(Coordinate::new(3, 1), ConwayState::ALIVE),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_seed_places_pattern_at_offset() {
        let mut sim = Simulation::new(6, 6).unwrap();
        sim.seed(&Pattern::glider(), Coordinate::new(3, 2), ConwayState).unwrap();
        assert_eq!(alive(&sim), vec![(4, 2), (5, 3), (3, 4), (4, 4), (5, 4)]);
        // every coordinate is populated
        assert!(sim.cell(Coordinate::new(0, 6)).unwrap().is_some());
    }

    #[test]
    fn test_seed_rejects_overflowing_pattern() {
        let mut sim: Simulation<ConwayState> = Simulation::new(6, 6).unwrap();
        assert!(matches!(
            sim.seed(&Pattern::glider(), Coordinate::new(5, 0), ConwayState),
            Err(Error::OutOfBounds { .. })
        ));
        assert_eq!(sim.phase(), Phase::Created);
    }

    #[test]
    fn test_colors_follow_age() {
        let mut sim = conway(3, 3, &[(1, 1), (2, 1), (1, 2), (2, 2)])
            .with_colors(vec!["red".into(), "green".into(), "blue".into()]);
        let colors = |sim: &Simulation<ConwayState>| {
            sim.live_cells().map(|(_, c)| c.to_string()).collect::<Vec<_>>()
        };
        assert_eq!(colors(&sim), vec!["red"; 4]);
        sim.step().unwrap();
        assert_eq!(colors(&sim), vec!["green"; 4]);
        sim.step().unwrap();
        sim.step().unwrap();
        assert_eq!(colors(&sim), vec!["blue"; 4]);
    }

    #[test]
    fn test_empty_palette_keeps_default() {
        let sim: Simulation<ConwayState> = Simulation::new(1, 1).unwrap().with_colors(vec![]);
        assert_eq!(sim.colors(), ["white".to_string()]);
    }

    #[test]
    fn test_stopped_rejects_transitions() {
        let mut sim = conway(2, 2, &[(1, 1)]);
        sim.stop();
        assert_eq!(sim.step(), Err(Error::Stopped));
        assert_eq!(
            sim.spawn_state(Coordinate::ORIGIN, ConwayState::ALIVE),
            Err(Error::Stopped)
        );
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_snapshot_matches_live_cells() {
        let mut sim = Simulation::new(16, 16).unwrap();
        sim.seed(&Pattern::pulsar(), Coordinate::new(2, 2), ConwayState)
            .unwrap();
        sim.step().unwrap();
        let snapshot = sim.snapshot();
        assert_eq!((snapshot.xmax(), snapshot.ymax()), (16, 16));
        assert_eq!(snapshot.population(), sim.population());
        assert_eq!(
            snapshot.live_cells().collect::<Vec<_>>(),
            sim.live_cells().map(|(c, _)| c).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_oversized_field_is_rejected() {
        assert!(matches!(
            Simulation::<ConwayState>::new(u32::MAX, u32::MAX),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_config_validation() {
        assert!(matches!(RunConfig::new(0, 5), Err(Error::InvalidConfig(_))));
        let config = RunConfig::new(4, 5).unwrap();
        assert_eq!(config.period(), Duration::from_millis(250));
        assert!(config.render());
        assert!(!config.debug());
    }
}
