use super::{check_area, Pattern, MAX_EXTENT};
use crate::{Coordinate, Error, Result};
use ahash::AHashSet;
use std::fmt::Write;

const KIND: &str = "plain pattern";

pub(super) fn decode(text: &str) -> Result<Pattern> {
    let mut live = AHashSet::new();
    let (mut xmax, mut ymax) = (0, 0);

    // the first line is a header
    for (i, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let [x, y] = parse_line(line).ok_or_else(|| {
            Error::format(
                KIND,
                format!(
                    "line {}: expected two non-negative integers, got \"{}\"",
                    i + 1,
                    line
                ),
            )
        })?;
        if x > MAX_EXTENT || y > MAX_EXTENT {
            return Err(Error::format(
                KIND,
                format!(
                    "line {}: ({}, {}) exceeds the maximum extent {}",
                    i + 1,
                    x,
                    y,
                    MAX_EXTENT
                ),
            ));
        }
        xmax = xmax.max(x);
        ymax = ymax.max(y);
        live.insert(Coordinate::new(x.into(), y.into()));
    }

    if live.is_empty() {
        return Err(Error::format(KIND, "no coordinates listed"));
    }
    check_area(KIND, xmax, ymax)?;
    Pattern::new(xmax, ymax, live)
}

fn parse_line(line: &str) -> Option<[u32; 2]> {
    let mut parts = line.split_whitespace().map(|part| part.parse::<u32>());
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    parts.next().is_none().then_some([x, y])
}

pub(super) fn encode(pattern: &Pattern) -> String {
    let mut result = format!("{}\n", pattern.population());
    for coord in pattern.live_cells() {
        // writing to a String cannot fail
        let _ = writeln!(result, "{} {}", coord.x, coord.y);
    }
    result
}
