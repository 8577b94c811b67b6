//! Drawing a frame: visible lines followed by the status row. Also the
//! one-shot output used when there is no terminal to page in.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use crate::app::Model;
use crate::render::style::RESET;
use crate::render::text::{pad_right, strip_ansi, truncate};
use crate::search::highlight_matches;
use crate::ui::status::status_text;

/// Queue one full frame to `out` and flush it.
///
/// Each document row is truncated to the terminal width so long lines never
/// wrap onto the next row. Rows past the end of the document are cleared.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn draw<W: Write>(out: &mut W, model: &Model) -> io::Result<()> {
    let vp = &model.viewport;
    let cols = usize::from(vp.cols());
    let offset = vp.offset();

    for row in 0..vp.view_height() {
        queue!(out, MoveTo(0, screen_row(row)))?;
        if let Some(line) = model.lines.get(offset + row) {
            let line = if model.has_query() {
                highlight_matches(line, &model.search_query)
            } else {
                line.clone()
            };
            queue!(out, Print(truncate(&line, cols)), Print(RESET))?;
        }
        queue!(out, Clear(ClearType::UntilNewLine))?;
    }

    let status = status_line(model, cols);
    queue!(
        out,
        MoveTo(0, vp.rows().saturating_sub(1)),
        SetAttribute(Attribute::Reverse),
        Print(status),
        SetAttribute(Attribute::Reset),
    )?;
    out.flush()
}

/// Status text fitted to exactly `cols` columns.
pub fn status_line(model: &Model, cols: usize) -> String {
    pad_right(&truncate(&status_text(model), cols), cols)
}

/// Print every line once, for piped output or `--plain`.
///
/// With `strip_styles` the escape sequences are removed first.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_plain<W: Write>(
    out: &mut W,
    lines: &[String],
    strip_styles: bool,
) -> io::Result<()> {
    for line in lines {
        if strip_styles {
            writeln!(out, "{}", strip_ansi(line))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}

fn screen_row(row: usize) -> u16 {
    u16::try_from(row).unwrap_or(u16::MAX)
}
