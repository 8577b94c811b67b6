use std::path::{Path, PathBuf};

use crate::search::find_matches;
use crate::ui::viewport::Viewport;

/// Which keys the pager is listening for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Scrolling and commands
    #[default]
    Normal,
    /// Typing a search query after `/`
    SearchEntry,
}

/// The complete pager state.
///
/// All state lives here - no global or scattered state. Mutated only by
/// [`super::update`].
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Compiled document lines
    pub lines: Vec<String>,
    /// Viewport managing scroll position and terminal size
    pub viewport: Viewport,
    pub mode: Mode,
    /// Query being typed in search entry
    pub search_input: String,
    /// Last committed query; empty when no search is active
    pub search_query: String,
    /// Line indices that match `search_query`, ascending
    pub search_matches: Vec<usize>,
    /// Backing file, if the document came from one
    pub file_path: Option<PathBuf>,
    /// Optional cap on the wrap width in columns
    pub max_width: Option<u16>,
    /// Width the current `lines` were compiled at
    pub rendered_width: usize,
    /// Whether the pager should exit
    pub should_quit: bool,
}

impl Model {
    /// Create a model for lines compiled at the terminal's current width.
    pub fn new(lines: Vec<String>, size: (u16, u16)) -> Self {
        let (cols, rows) = size;
        Self {
            viewport: Viewport::new(cols, rows, lines.len()),
            rendered_width: usize::from(cols.max(1)),
            lines,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_file_path(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Cap the wrap width. `lines` must have been compiled at the capped width.
    #[must_use]
    pub fn with_max_width(mut self, max_width: Option<u16>) -> Self {
        self.max_width = max_width.filter(|w| *w > 0);
        self.rendered_width = self.wrap_width();
        self
    }

    /// Width to compile at: terminal columns, capped by `max_width`.
    pub fn wrap_width(&self) -> usize {
        let cols = self.viewport.cols().max(1);
        let width = self.max_width.map_or(cols, |max| cols.min(max));
        usize::from(width)
    }

    /// The terminal width changed since the lines were compiled.
    pub fn needs_recompile(&self) -> bool {
        self.wrap_width() != self.rendered_width
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Editing is only offered for documents read from a file.
    pub const fn can_edit(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn has_query(&self) -> bool {
        !self.search_query.is_empty()
    }

    /// Swap in freshly compiled lines, keeping the scroll offset valid and
    /// the active search current.
    pub(super) fn set_lines(&mut self, lines: Vec<String>, width: usize) {
        self.lines = lines;
        self.rendered_width = width;
        self.viewport.set_total_lines(self.lines.len());
        self.refresh_search_matches();
    }

    pub(super) fn refresh_search_matches(&mut self) {
        self.search_matches = find_matches(&self.lines, &self.search_query);
    }
}
