//! Markdown document model, parsing, and input loading.
//!
//! This module handles:
//! - Parsing markdown with comrak into a typed block tree
//! - Reading and validating input files and stdin
//! - Wrapping recognized source files as highlighted code

mod parser;
mod source;
mod types;

pub use parser::{MAX_BLOCK_DEPTH, MAX_INLINE_DEPTH, neutralize_controls, parse};
pub use source::{SourceError, load_file, read_file, read_stdin, reload_file, validate};
pub use types::{Alignment, Block, Inline, List, ListItem, Table, plain_text};

use std::path::Path;

/// Prepare file content for rendering based on its extension.
///
/// If the file has a recognized code extension, wrap content in a fenced code
/// block so it renders with syntax highlighting. Markdown and unrecognized
/// files pass through unchanged.
pub fn prepare_content(file_path: &Path, content: String) -> String {
    let Some(language) = crate::highlight::language_for_file(file_path) else {
        return content;
    };
    let fence = fence_for(&content);
    format!("{fence}{language}\n{content}\n{fence}")
}

/// A backtick fence longer than any backtick run inside `content`.
fn fence_for(content: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in content.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}
