//! Rendering a document tree into styled terminal lines.
//!
//! The output of [`Renderer::compile`] is the only thing the pager consumes:
//! a list of strings with embedded SGR escapes, one per terminal row.

mod block;
mod compile;
pub mod inline;
pub mod style;
pub mod text;

pub use inline::render_inline;

use crate::banner::{Banner, FigletBanner};
use crate::highlight::{BackgroundMode, Highlighter, SyntectHighlighter};

/// Block renderer and document compiler.
///
/// Holds the two external collaborators: a syntax highlighter for code
/// blocks and an art renderer for level-1 headings. Failures from either
/// degrade to plain text.
pub struct Renderer {
    highlighter: Box<dyn Highlighter>,
    banner: Box<dyn Banner>,
}

impl Renderer {
    pub fn new(mode: BackgroundMode) -> Self {
        Self {
            highlighter: Box::new(SyntectHighlighter::new(mode)),
            banner: Box::new(FigletBanner),
        }
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    #[must_use]
    pub fn with_banner(mut self, banner: impl Banner + 'static) -> Self {
        self.banner = Box::new(banner);
        self
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(BackgroundMode::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}
