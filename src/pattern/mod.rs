mod builtin;
mod plain;
mod rle;

pub use builtin::BUILTIN_PATTERNS;

use crate::{Coordinate, Error, Grid, LifeRule, Result};
use anyhow::{anyhow, Context};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use rand::{Rng, SeedableRng};
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

/// Largest accepted extent of a decoded pattern along either axis.
pub const MAX_EXTENT: u32 = 1 << 16;

/// Largest accepted number of cells, live or dead, of a decoded pattern.
pub const MAX_CELLS: u64 = 1 << 24;

/// Rejects decoded bounds spanning more than [`MAX_CELLS`] cells.
fn check_area(kind: &'static str, xmax: u32, ymax: u32) -> Result<()> {
    let area = (u64::from(xmax) + 1).checked_mul(u64::from(ymax) + 1);
    match area {
        Some(area) if area <= MAX_CELLS => Ok(()),
        _ => Err(Error::format(
            kind,
            format!(
                "{}x{} cells exceed the maximum of {}",
                u64::from(xmax) + 1,
                u64::from(ymax) + 1,
                MAX_CELLS
            ),
        )),
    }
}

/// A rectangular configuration of live and dead cells used to seed a
/// simulation.
///
/// # Overview
///
/// A pattern spans `(0, 0)..=(xmax, ymax)` and is built either from one of
/// the [`PatternFormat`]s, from a built-in constructor (see
/// [`BUILTIN_PATTERNS`]) or randomly. It is a transient value: once handed to
/// [`Simulation::seed`](crate::Simulation::seed) it may be dropped.
///
/// Besides the cells, a pattern may carry metadata found in its source:
/// the rule and the nominal size declared in an RLE header. Both are purely
/// informational, the decoders never trust the declared size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    cells: Grid<bool>,
    rule: Option<LifeRule>,
    declared_size: Option<(u32, u32)>,
}

impl Pattern {
    /// Creates a pattern of the given bounds with the listed cells alive.
    ///
    /// # Errors
    ///
    /// * [`Error::OutOfBounds`] if a live cell lies outside of the bounds.
    /// * [`Error::InvalidConfig`] if the bounds are too large for a grid.
    pub fn new(
        xmax: u32,
        ymax: u32,
        live: impl IntoIterator<Item = Coordinate>,
    ) -> Result<Self> {
        let mut cells = Grid::new(xmax, ymax, false)?;
        for coord in live {
            cells.set(coord, true)?;
        }
        Ok(Self::from_grid(cells))
    }

    /// Wraps a grid of alive flags.
    pub fn from_grid(cells: Grid<bool>) -> Self {
        Self {
            cells,
            rule: None,
            declared_size: None,
        }
    }

    /// Creates a pattern from data in the specified format.
    ///
    /// # Arguments
    ///
    /// * `format` - The format of the provided data.
    /// * `data` - The bytes containing the pattern data, UTF-8 encoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the data is not valid UTF-8 or does not
    /// follow the format (see [`PatternFormat`] for the exact grammar).
    pub fn from_format(format: PatternFormat, data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|err| Error::format(format.kind(), err.to_string()))?;
        match format {
            PatternFormat::Plain => plain::decode(text),
            PatternFormat::RLE => rle::decode(text),
        }
    }

    /// Converts the pattern to the specified format.
    pub fn to_format(&self, format: PatternFormat) -> Vec<u8> {
        let text = match format {
            PatternFormat::Plain => plain::encode(self),
            PatternFormat::RLE => rle::encode(self),
        };
        text.into_bytes()
    }

    /// Loads a pattern from a file, choosing the format by its extension
    /// (see [`PatternFormat::from_path`]). Files ending with `.gz` are
    /// decompressed first.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let format = PatternFormat::from_path(path)
            .ok_or_else(|| anyhow!("Unsupported pattern file extension: {}", path.display()))?;
        let raw = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let data = if is_gzipped(path) {
            let mut data = Vec::new();
            GzDecoder::new(&raw[..])
                .read_to_end(&mut data)
                .with_context(|| format!("Failed to decompress {}", path.display()))?;
            data
        } else {
            raw
        };
        Self::from_format(format, &data)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Saves the pattern to a file, choosing the format by its extension.
    /// Files ending with `.gz` are compressed.
    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let format = PatternFormat::from_path(path)
            .ok_or_else(|| anyhow!("Unsupported pattern file extension: {}", path.display()))?;
        let data = self.to_format(format);
        let data = if is_gzipped(path) {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&data)?;
            encoder.finish()?
        } else {
            data
        };
        std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Creates a random pattern of the specified size.
    ///
    /// # Arguments
    ///
    /// * `xmax`, `ymax` - Bounds of the pattern.
    /// * `density` - Probability of each cell to be alive, in `0.0..=1.0`.
    /// * `seed` - Optional seed for the random number generator.
    ///   If None, seeds from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `density` is not a probability or
    /// the bounds are too large for a grid.
    pub fn random(xmax: u32, ymax: u32, density: f64, seed: Option<u64>) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(Error::InvalidConfig(format!(
                "density {} is not within 0.0..=1.0",
                density
            )));
        }
        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_os_rng()
        };
        let cells = Grid::from_fn(xmax, ymax, |_| rng.random_bool(density))?;
        Ok(Self::from_grid(cells))
    }

    /// Looks up a built-in pattern by name.
    ///
    /// Names are compared case-insensitively and `-` matches `_`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPattern`] if no built-in pattern has that name.
    pub fn builtin(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        BUILTIN_PATTERNS
            .iter()
            .find(|(builtin, _)| *builtin == normalized)
            .map(|(_, build)| build())
            .ok_or_else(|| Error::UnknownPattern(name.to_string()))
    }

    pub fn grid(&self) -> &Grid<bool> {
        &self.cells
    }

    pub fn xmax(&self) -> u32 {
        self.cells.xmax()
    }

    pub fn ymax(&self) -> u32 {
        self.cells.ymax()
    }

    /// Checks if the cell at `coord` is alive; cells outside of the pattern
    /// are dead.
    pub fn is_alive(&self, coord: Coordinate) -> bool {
        self.cells.get(coord).is_ok_and(|&alive| alive)
    }

    /// Iterates over live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells
            .iter()
            .filter_map(|(coord, &alive)| alive.then_some(coord))
    }

    /// Counts the live cells.
    pub fn population(&self) -> usize {
        self.live_cells().count()
    }

    /// The rule declared by the source of the pattern, if any.
    pub fn rule(&self) -> Option<LifeRule> {
        self.rule
    }

    pub fn set_rule(&mut self, rule: Option<LifeRule>) {
        self.rule = rule;
    }

    /// The `(x, y)` size declared by an RLE header, if any.
    pub fn declared_size(&self) -> Option<(u32, u32)> {
        self.declared_size
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Supported textual encodings of patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternFormat {
    /// A line-oriented list of live coordinates.
    ///
    /// The first line is a header (conventionally the number of live cells)
    /// and is ignored. Every following non-blank line holds two
    /// whitespace-separated non-negative integers `x y`. The bounds of the
    /// decoded pattern are the largest `x` and the largest `y` listed.
    Plain,
    /// See https://conwaylife.com/wiki/Run_Length_Encoded.
    ///
    /// Lines starting with `#` are comments. The first other line is the
    /// header `x = <int>, y = <int>`, optionally followed by `rule = <rule>`
    /// and further fields which are ignored. The remaining lines form the
    /// body: `<count>o` emits live cells, `<count>b` skips dead ones,
    /// `<count>$` ends rows and `!` ends the pattern. Any other character
    /// only resets the pending count. The bounds of the decoded pattern are
    /// the farthest cursor positions reached while scanning the body.
    RLE,
}

impl PatternFormat {
    /// Guesses the format from a file name, looking through a trailing `.gz`.
    ///
    /// `.rle` maps to [`PatternFormat::RLE`]; `.life`, `.lif` and `.txt` map
    /// to [`PatternFormat::Plain`].
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let path = if is_gzipped(path) {
            Path::new(path.file_stem()?)
        } else {
            path
        };
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "rle" => Some(PatternFormat::RLE),
            "life" | "lif" | "txt" => Some(PatternFormat::Plain),
            _ => None,
        }
    }

    fn kind(self) -> &'static str {
        match self {
            PatternFormat::Plain => "plain pattern",
            PatternFormat::RLE => "RLE pattern",
        }
    }
}

impl fmt::Display for PatternFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternFormat::Plain => "plain",
            PatternFormat::RLE => "RLE",
        })
    }
}
