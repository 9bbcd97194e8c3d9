use crate::colors::parse_color;
use crate::render::{Headless, TerminalRenderer};
use crate::util::{load_pattern, local_time, print_population};
use anyhow::Result;
use clap::{Args, ValueEnum};
use term_automata::{
    CellState, ConwayState, Coordinate, LifeLikeState, LifeRule, Pattern, Renderer, RunConfig,
    Simulation,
};
use tokio::sync::watch;

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    /// A built-in pattern name, "random", or a path to a .rle/.life file (optionally .gz)
    #[arg(default_value = "random")]
    target: String,

    /// Generations per second
    #[arg(short, long, default_value_t = 30)]
    refresh_rate: u32,

    /// Number of generations to run for, 0 runs until interrupted with Ctrl-C
    #[arg(short, long, default_value_t = 0)]
    generations: u64,

    /// Cell colors by age: color names or hex values, newborn cells use the first one
    #[arg(short, long, num_args = 1.., value_parser = parse_color)]
    colors: Vec<String>,

    /// Show a status line with per-generation diagnostics
    #[arg(short = 'x', long)]
    debug: bool,

    /// Run without drawing, e.g. to measure or to save the final state
    #[arg(short, long)]
    no_render: bool,

    /// The cells counted as neighbors, default is moore
    #[arg(long, value_enum, default_value_t = Neighborhood::Moore)]
    neighborhood: Neighborhood,

    /// The topology of the field, default is bounded
    #[arg(short, long, value_enum, default_value_t = Topology::Bounded)]
    topology: Topology,

    /// A life-like rule such as B36/S23; defaults to the pattern's rule or B3/S23
    #[arg(long)]
    rule: Option<LifeRule>,

    /// Seed of the random soup
    #[arg(long)]
    seed: Option<u64>,

    /// Probability of a cell of the random soup to be alive
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// Path to the file where the final state will be saved
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Neighborhood {
    /// The eight surrounding cells
    Moore,
    /// The four orthogonally adjacent cells
    VonNeumann,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Topology {
    /// Cells beyond the edges do not exist
    Bounded,
    /// Opposite edges of the field are stitched together
    Torus,
}

const FALLBACK_TERMINAL_SIZE: (u16, u16) = (80, 24);

pub(super) fn run_run(args: RunArgs) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or(FALLBACK_TERMINAL_SIZE);
    let text_rows = if args.debug { rows.saturating_sub(1) } else { rows }.max(1);
    let screen = Coordinate::new(i64::from(cols.max(1)) - 1, 2 * i64::from(text_rows) - 1);

    let timer = std::time::Instant::now();
    let pattern = if args.target == "random" {
        Pattern::random(screen.x as u32, screen.y as u32, args.density, args.seed)?
    } else {
        load_pattern(&args.target)?
    };
    println!(
        "Loaded pattern in {:.1} secs",
        timer.elapsed().as_secs_f64()
    );

    let rule = args.rule.or(pattern.rule()).unwrap_or_default();
    let status_row = args.debug.then_some(text_rows);
    let size = (cols, text_rows);
    let mut state = if rule == LifeRule::CONWAY {
        simulate(&args, &pattern, screen, size, status_row, ConwayState)?
    } else {
        simulate(&args, &pattern, screen, size, status_row, move |alive| {
            LifeLikeState::new(alive, rule)
        })?
    };

    print_population(&state);
    if let Some(output) = &args.output {
        state.set_rule(Some(rule));
        state.to_file(output)?;
        println!("Saved final state to {}", output);
    }
    Ok(())
}

/// Runs the pattern on a field at least as large as the screen, centered.
fn simulate<S: CellState>(
    args: &RunArgs,
    pattern: &Pattern,
    screen: Coordinate,
    size: (u16, u16),
    status_row: Option<u16>,
    make_state: impl Fn(bool) -> S,
) -> Result<Pattern> {
    let xmax = screen.x.max(pattern.xmax().into());
    let ymax = screen.y.max(pattern.ymax().into());
    let offset = Coordinate::new(
        (xmax - i64::from(pattern.xmax())) / 2,
        (ymax - i64::from(pattern.ymax())) / 2,
    );

    let timer = std::time::Instant::now();
    let mut sim = Simulation::new(xmax as u32, ymax as u32)?
        .with_neighborhood(match args.neighborhood {
            Neighborhood::Moore => term_automata::Neighborhood::Moore,
            Neighborhood::VonNeumann => term_automata::Neighborhood::VonNeumann,
        })
        .with_topology(match args.topology {
            Topology::Bounded => term_automata::Topology::Bounded,
            Topology::Torus => term_automata::Topology::Torus,
        })
        .with_colors(args.colors.clone());
    sim.seed(pattern, offset, make_state)?;
    println!(
        "Populated {}x{} field in {:.1} secs",
        xmax + 1,
        ymax + 1,
        timer.elapsed().as_secs_f64()
    );

    let config = RunConfig::new(args.refresh_rate, args.generations)?
        .with_debug(args.debug)
        .with_render(!args.no_render);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = runtime.block_on(async {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    let _ = cancel_tx.send(true);
                }
                // keep the sender alive, dropping it would cancel the run
                Err(_) => std::future::pending().await,
            }
        });

        let mut renderer: Box<dyn Renderer> = if config.render() {
            Box::new(TerminalRenderer::new(sim.colors(), size, status_row)?)
        } else {
            Box::new(Headless)
        };
        sim.run(&config, renderer.as_mut(), &mut cancel_rx).await
    })?;

    println!(
        "[{}] Ran {} generations in {:.1} secs{}",
        local_time(),
        summary.steps,
        summary.elapsed.as_secs_f64(),
        if summary.cancelled { " (interrupted)" } else { "" }
    );
    Ok(sim.snapshot())
}
