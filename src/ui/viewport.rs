//! Viewport management for scrolling.
//!
//! The [`Viewport`] tracks the terminal size, the scroll offset, and the
//! number of compiled lines. The bottom terminal row is reserved for the
//! status line, so the document area is one row shorter than the terminal.

use std::ops::Range;

/// Manages the visible portion of the compiled lines.
///
/// Every mutating method leaves `offset` within `0..=max_scroll()`.
///
/// # Example
///
/// ```
/// use glyphmd::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 25, 100);
/// assert_eq!(vp.view_height(), 24);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    cols: u16,
    rows: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a viewport at the top of the document.
    ///
    /// `cols` and `rows` are the full terminal size, status row included.
    pub const fn new(cols: u16, rows: u16, total_lines: usize) -> Self {
        Self {
            cols,
            rows,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn cols(&self) -> u16 {
        self.cols
    }

    pub const fn rows(&self) -> u16 {
        self.rows
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Rows available for document lines.
    pub const fn view_height(&self) -> usize {
        self.rows.saturating_sub(1) as usize
    }

    /// Largest valid offset: `max(0, total_lines - view_height)`.
    pub const fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.view_height())
    }

    /// Indices of the lines currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines);
        let end = (self.offset + self.view_height()).min(self.total_lines);
        start..end
    }

    /// Scroll position as a percentage, 100 when nothing can scroll.
    pub fn scroll_percent(&self) -> u8 {
        let max = self.max_scroll();
        if max == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max as f64) * 100.0).round() as u8
        }
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_scroll());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.view_height());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.view_height());
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_scroll();
    }

    /// Put `line` at the top of the view, clamped to `max_scroll()`.
    pub fn go_to_line(&mut self, line: usize) {
        self.offset = line.min(self.max_scroll());
    }

    /// Adopt a new terminal size and re-clamp the offset.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.offset = self.offset.min(self.max_scroll());
    }

    /// Adopt a new line count (after recompiling) and re-clamp the offset.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_scroll());
    }
}
