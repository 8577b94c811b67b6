// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. banner::BannerError)
    clippy::module_name_repetitions
)]

//! # Glyphmd
//!
//! A terminal markdown pager.
//!
//! Glyphmd compiles a markdown document into a list of styled terminal
//! lines and pages through them with:
//! - Syntax-highlighted code blocks in framed boxes
//! - ASCII-art level-1 headings
//! - Boxed tables, block quotes, and task lists
//! - Case-insensitive search with highlighted matches
//! - Hand-off to an external editor with reload on return
//!
//! ## Architecture
//!
//! Rendering is a pure pipeline: markdown → [`document::Block`] tree →
//! `Vec<String>` of escaped lines. The pager uses The Elm Architecture
//! (TEA) pattern:
//! - **Model**: Pager state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Draw the visible lines and the status row
//!
//! ## Modules
//!
//! - [`app`]: Pager state machine, input, editor handoff, event loop
//! - [`banner`]: ASCII-art heading renderer
//! - [`config`]: Persistent default flags
//! - [`document`]: Markdown parsing and input loading
//! - [`highlight`]: Syntax highlighting
//! - [`render`]: Block and inline rendering, document compiler
//! - [`search`]: Search functionality
//! - [`ui`]: Viewport, status row, and screen drawing

pub mod app;
pub mod banner;
pub mod config;
pub mod document;
pub mod highlight;
pub mod render;
pub mod search;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Block, Inline};
    pub use crate::render::Renderer;
    pub use crate::ui::viewport::Viewport;
}
