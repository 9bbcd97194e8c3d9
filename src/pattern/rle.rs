use super::{check_area, Pattern, MAX_EXTENT};
use crate::{Coordinate, Error, LifeRule, Result, VERSION};
use ahash::AHashSet;
use std::fmt::Write;

const KIND: &str = "RLE pattern";
const MAX_LINE_LENGTH: usize = 70;

struct Header {
    x: u32,
    y: u32,
    rule: Option<LifeRule>,
}

impl Header {
    /// Parses `x = <int>, y = <int>[, rule = <rule>][, ...]`.
    ///
    /// Fields after `y` are ignored, except for a `rule` that parses.
    fn parse(line: &str) -> std::result::Result<Self, String> {
        if !line.contains('=') {
            return Err(format!(
                "expected header \"x = <int>, y = <int>\", got \"{}\"",
                line
            ));
        }

        let mut fields = line
            .split(',')
            .map(|field| field.split_once('=').map(|(k, v)| (k.trim(), v.trim())));
        let mut extract_value = |expected_key: &str| match fields.next() {
            Some(Some((key, value))) if key == expected_key => value
                .parse::<u32>()
                .map_err(|_| format!("invalid value \"{}\" for \"{}\"", value, key)),
            _ => Err(format!("missing \"{} = <int>\"", expected_key)),
        };
        let x = extract_value("x")?;
        let y = extract_value("y")?;

        let rule = fields.find_map(|field| match field {
            Some((key, value)) if key.eq_ignore_ascii_case("rule") => value.parse().ok(),
            _ => None,
        });
        Ok(Self { x, y, rule })
    }
}

pub(super) fn decode(text: &str) -> Result<Pattern> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (n, line) = lines
        .next()
        .ok_or_else(|| Error::format(KIND, "missing header"))?;
    let header = Header::parse(line)
        .map_err(|reason| Error::format(KIND, format!("line {}: {}", n, reason)))?;

    // line breaks inside the body carry no meaning
    let body: String = lines.map(|(_, line)| line).collect();
    let (live, max) = scan(&body)?;

    let mut pattern = Pattern::new(max.x as u32, max.y as u32, live)?;
    pattern.rule = header.rule;
    pattern.declared_size = Some((header.x, header.y));
    Ok(pattern)
}

/// Runs the body through the decoder state machine.
///
/// Returns the live cells and the farthest cursor position reached.
fn scan(body: &str) -> Result<(AHashSet<Coordinate>, Coordinate)> {
    let mut live = AHashSet::new();
    let mut count: Option<u32> = None;
    let (mut x, mut y) = (0u32, 0u32);
    let (mut xmax, mut ymax) = (0u32, 0u32);

    for c in body.chars() {
        match c {
            '0'..='9' => {
                let digit = c as u32 - '0' as u32;
                let pending = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or_else(|| Error::format(KIND, "run count overflows"))?;
                count = Some(pending);
                continue;
            }
            'o' => {
                let end = advance(x, count.take().unwrap_or(1))?;
                live.extend((x..end).map(|x| Coordinate::new(x.into(), y.into())));
                x = end;
            }
            'b' => x = advance(x, count.take().unwrap_or(1))?,
            '$' => {
                y = advance(y, count.take().unwrap_or(1))?;
                x = 0;
            }
            '!' => return Ok((live, Coordinate::new(xmax.into(), ymax.into()))),
            _ => count = None,
        }
        if x > xmax || y > ymax {
            xmax = xmax.max(x);
            ymax = ymax.max(y);
            check_area(KIND, xmax, ymax)?;
        }
    }

    Err(Error::format(KIND, "missing terminating '!'"))
}

fn advance(position: u32, run: u32) -> Result<u32> {
    position
        .checked_add(run)
        .filter(|&p| p <= MAX_EXTENT)
        .ok_or_else(|| {
            Error::format(
                KIND,
                format!("pattern exceeds the maximum extent {}", MAX_EXTENT),
            )
        })
}

/// Appends runs to the body, wrapping lines before they exceed
/// `MAX_LINE_LENGTH` characters.
struct RunWriter {
    result: String,
    line_length: usize,
}

impl RunWriter {
    fn push(&mut self, run_length: u32, tag: char) {
        let run = if run_length > 1 {
            format!("{}{}", run_length, tag)
        } else {
            tag.to_string()
        };
        if self.line_length + run.len() > MAX_LINE_LENGTH {
            self.result.push('\n');
            self.line_length = 0;
        }
        self.result.push_str(&run);
        self.line_length += run.len();
    }
}

pub(super) fn encode(pattern: &Pattern) -> String {
    let rule = pattern.rule().unwrap_or_default();
    let mut result = format!("#C Generated by term_automata {}\n", VERSION);

    // the pattern stays anchored at the origin, so only the far edges are trimmed
    let extent = pattern
        .live_cells()
        .fold(None, |acc: Option<(i64, i64)>, c| match acc {
            Some((w, h)) => Some((w.max(c.x + 1), h.max(c.y + 1))),
            None => Some((c.x + 1, c.y + 1)),
        });
    let Some((width, height)) = extent else {
        let _ = writeln!(result, "x = 0, y = 0, rule = {}", rule);
        result.push('!');
        return result;
    };
    let _ = writeln!(result, "x = {}, y = {}, rule = {}", width, height, rule);

    let mut writer = RunWriter {
        result,
        line_length: 0,
    };
    let mut cursor_y = 0;
    for y in 0..height {
        let row: Vec<bool> = (0..width)
            .map(|x| pattern.is_alive(Coordinate::new(x, y)))
            .collect();
        let Some(last) = row.iter().rposition(|&alive| alive) else {
            continue;
        };
        if y > cursor_y {
            writer.push((y - cursor_y) as u32, '$');
            cursor_y = y;
        }

        let mut run_length = 0u32;
        let mut last_state = row[0];
        for &current_state in &row[..=last] {
            if current_state != last_state {
                writer.push(run_length, if last_state { 'o' } else { 'b' });
                run_length = 0;
                last_state = current_state;
            }
            run_length += 1;
        }
        writer.push(run_length, if last_state { 'o' } else { 'b' });
    }
    writer.push(1, '!');
    writer.result
}
