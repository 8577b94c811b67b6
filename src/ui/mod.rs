//! Terminal UI components.
//!
//! - [`viewport`]: Scroll position and visible range management
//! - [`screen`]: Drawing the visible lines and the status row
//! - [`status`]: Status row text

pub mod screen;
pub mod status;
pub mod viewport;

pub use screen::{draw, status_line, write_plain};
pub use status::status_text;
