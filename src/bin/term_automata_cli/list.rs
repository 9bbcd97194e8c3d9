use anyhow::Result;
use term_automata::BUILTIN_PATTERNS;

pub(super) fn run_list() -> Result<()> {
    for (name, build) in BUILTIN_PATTERNS {
        let pattern = build();
        println!(
            "{:<24} {:>3}x{:<3} population {}",
            name,
            pattern.xmax() + 1,
            pattern.ymax() + 1,
            pattern.population()
        );
    }
    Ok(())
}
