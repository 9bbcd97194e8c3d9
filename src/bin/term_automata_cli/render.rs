use crate::colors::terminal_color;
use ahash::AHashMap;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{stdout, BufWriter, Stdout, Write};
use term_automata::{Coordinate, Frame, Renderer, StepReport};

/// Draws frames on the alternate screen, two grid rows per text row using
/// half block characters.
///
/// The terminal is restored when the renderer is dropped.
pub(super) struct TerminalRenderer {
    out: BufWriter<Stdout>,
    palette: AHashMap<String, Color>,
    /// Text columns and rows available to the field.
    size: (u16, u16),
    /// Row of the status line in debug mode.
    status_row: Option<u16>,
}

impl TerminalRenderer {
    pub(super) fn new(
        palette: &[String],
        size: (u16, u16),
        status_row: Option<u16>,
    ) -> Result<Self> {
        let mut out = BufWriter::new(stdout());
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self {
            out,
            palette: palette
                .iter()
                .map(|name| (name.clone(), terminal_color(name)))
                .collect(),
            size,
            status_row,
        })
    }

    fn color(&self, name: &str) -> Color {
        self.palette
            .get(name)
            .copied()
            .unwrap_or_else(|| terminal_color(name))
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        let colors: AHashMap<Coordinate, Color> = frame
            .cells
            .iter()
            .map(|&(coord, name)| (coord, self.color(name)))
            .collect();

        let (cols, rows) = self.size;
        let width = (frame.max.x + 1).min(cols.into());
        let height = ((frame.max.y + 2) / 2).min(rows.into());
        for row in 0..height {
            queue!(self.out, MoveTo(0, row as u16))?;
            for x in 0..width {
                let top = colors.get(&Coordinate::new(x, 2 * row)).copied();
                let bottom = colors.get(&Coordinate::new(x, 2 * row + 1)).copied();
                queue!(self.out, ResetColor)?;
                match (top, bottom) {
                    (Some(top), Some(bottom)) => queue!(
                        self.out,
                        SetForegroundColor(top),
                        SetBackgroundColor(bottom),
                        Print('▀')
                    )?,
                    (Some(top), None) => queue!(self.out, SetForegroundColor(top), Print('▀'))?,
                    (None, Some(bottom)) => {
                        queue!(self.out, SetForegroundColor(bottom), Print('▄'))?
                    }
                    (None, None) => queue!(self.out, Print(' '))?,
                }
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, report: &StepReport) {
        let Some(row) = self.status_row else {
            return;
        };
        let line = format!(
            "generation {} | population {} | step {:.3} ms",
            report.generation,
            report.population,
            report.elapsed.as_secs_f64() * 1e3
        );
        // a lost status line is not worth aborting the run
        let _ = queue!(
            self.out,
            MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            Print(line)
        );
        let _ = self.out.flush();
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
    }
}

/// Used when rendering is disabled: draws nothing and prints step reports
/// to stdout.
pub(super) struct Headless;

impl Renderer for Headless {
    fn draw(&mut self, _frame: &Frame<'_>) -> Result<()> {
        Ok(())
    }
}
