//! Interactive pager state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete pager state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with drawing and side effects

mod effects;
mod event_loop;
pub mod input;
pub mod model;
pub mod session;
mod update;

pub use effects::{DEFAULT_EDITOR, editor_command, resolve_editor};
pub use model::{Mode, Model};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::render::Renderer;

/// Owns the document source and the renderer, and runs the pager.
#[derive(Debug)]
pub struct App {
    source: String,
    file_path: Option<PathBuf>,
    renderer: Renderer,
    editor: Option<String>,
    max_width: Option<u16>,
}

impl App {
    /// Create a pager for already-loaded markdown.
    pub fn new(source: String, renderer: Renderer) -> Self {
        Self {
            source,
            file_path: None,
            renderer,
            editor: None,
            max_width: None,
        }
    }

    /// Set the file the source was read from. Enables editing.
    #[must_use]
    pub fn with_file_path(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Override the editor command, ahead of `$VISUAL` and `$EDITOR`.
    #[must_use]
    pub fn with_editor(mut self, editor: Option<String>) -> Self {
        self.editor = editor;
        self
    }

    /// Cap the wrap width in columns.
    #[must_use]
    pub const fn with_max_width(mut self, max_width: Option<u16>) -> Self {
        self.max_width = max_width;
        self
    }

    /// The markdown currently being shown.
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests;
