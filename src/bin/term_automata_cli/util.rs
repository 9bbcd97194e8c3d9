use anyhow::{bail, Result};
use chrono::Local;
use num_format::{CustomFormat, Grouping, ToFormattedString};
use term_automata::{Pattern, PatternFormat};

pub(super) fn format_count(count: u64) -> String {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()
        .unwrap_or_default();
    count.to_formatted_string(&fmt)
}

pub(super) fn print_population(pattern: &Pattern) {
    println!("Population: {}", format_count(pattern.population() as u64));
}

pub(super) fn local_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Resolves a pattern file path or a built-in pattern name.
///
/// Remote targets are rejected, patterns are only read from disk.
pub(super) fn load_pattern(target: &str) -> Result<Pattern> {
    if target.starts_with("http://") || target.starts_with("https://") {
        bail!("Remote patterns are not supported: {}", target);
    }
    if PatternFormat::from_path(target).is_some() {
        return Pattern::from_file(target);
    }
    Ok(Pattern::builtin(target)?)
}
