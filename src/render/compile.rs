//! Whole-document compilation.

use tracing::debug;

use crate::document::{Block, parse};

use super::Renderer;

/// Whether the compiler puts an empty line after this block.
///
/// Headings and rules frame themselves; raw and blank blocks are spacing.
const fn spaced(block: &Block) -> bool {
    matches!(
        block,
        Block::Paragraph(_)
            | Block::CodeBlock { .. }
            | Block::BlockQuote(_)
            | Block::List(_)
            | Block::Table(_)
    )
}

impl Renderer {
    /// Parse markdown and render it to lines at `width` columns.
    ///
    /// Pure in `markup` and `width`: calling it again on the same input
    /// yields the same lines.
    pub fn compile(&self, markup: &str, width: usize) -> Vec<String> {
        let blocks = parse(markup);
        let lines = self.compile_blocks(&blocks, width);
        debug!(blocks = blocks.len(), lines = lines.len(), width, "compiled document");
        lines
    }

    /// Render an already-parsed block sequence in document order.
    pub fn compile_blocks(&self, blocks: &[Block], width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for block in blocks {
            lines.extend(self.render_block(block, width));
            if spaced(block) {
                lines.push(String::new());
            }
        }
        lines
    }
}
