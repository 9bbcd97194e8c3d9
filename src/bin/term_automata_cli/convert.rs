use crate::util::{format_count, load_pattern, print_population};
use anyhow::Result;
use clap::Args;
use term_automata::{ConwayState, Coordinate, LifeLikeState, LifeRule, Pattern, Simulation};

#[derive(Args, Debug)]
pub(super) struct ConvertArgs {
    /// Path to the file containing the pattern or a built-in pattern name;
    /// supports .rle, .life, .lif and .txt, optionally gzipped
    pattern: String,

    /// Path to the file where the resulting pattern will be saved, its extension selects the format
    #[arg(short, long)]
    output: String,

    /// The pattern will be advanced by this many generations on a bounded field of its own size
    #[arg(short, long, default_value_t = 0)]
    generations: u64,

    /// A life-like rule to advance with and to record in RLE output;
    /// defaults to the pattern's rule or B3/S23
    #[arg(long)]
    rule: Option<LifeRule>,
}

pub(super) fn run_convert(args: ConvertArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let pattern = load_pattern(&args.pattern)?;
    println!(
        "Loaded pattern in {:.1} secs",
        timer.elapsed().as_secs_f64()
    );

    let rule = args.rule.or(pattern.rule()).unwrap_or_default();
    let mut updated = if args.generations == 0 {
        pattern
    } else {
        let timer = std::time::Instant::now();
        let updated = if rule == LifeRule::CONWAY {
            advance(&pattern, args.generations, ConwayState)?
        } else {
            advance(&pattern, args.generations, move |alive| {
                LifeLikeState::new(alive, rule)
            })?
        };
        println!(
            "Updated pattern by {} generations in {:.1} secs",
            format_count(args.generations),
            timer.elapsed().as_secs_f64()
        );
        updated
    };

    print_population(&updated);
    updated.set_rule(Some(rule));
    updated.to_file(&args.output)?;
    Ok(())
}

fn advance<S: term_automata::CellState>(
    pattern: &Pattern,
    generations: u64,
    make_state: impl Fn(bool) -> S,
) -> Result<Pattern> {
    let mut sim = Simulation::new(pattern.xmax(), pattern.ymax())?;
    sim.seed(pattern, Coordinate::ORIGIN, make_state)?;
    for _ in 0..generations {
        sim.step()?;
    }
    Ok(sim.snapshot())
}
