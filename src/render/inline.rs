//! Inline node rendering.

use crate::document::{Inline, MAX_INLINE_DEPTH, plain_text};

use super::style::{self, CODE_BG, CODE_FG, Color};

/// Render a run of inline nodes into one styled string.
///
/// Line breaks become `\n`; the block renderer splits on them when wrapping.
pub fn render_inline(nodes: &[Inline]) -> String {
    render_at(nodes, 0)
}

fn render_at(nodes: &[Inline], depth: usize) -> String {
    if depth > MAX_INLINE_DEPTH {
        return plain_text(nodes);
    }
    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(text) | Inline::Escaped(text) => out.push_str(text),
            Inline::Strong(children) => out.push_str(&style::bold(&render_at(children, depth + 1))),
            Inline::Emphasis(children) => {
                out.push_str(&style::italic(&render_at(children, depth + 1)));
            }
            Inline::Strikethrough(children) => {
                out.push_str(&style::strikethrough(&render_at(children, depth + 1)));
            }
            Inline::Code(code) => {
                out.push_str(&code_span(code));
            }
            Inline::Link { url, content } => {
                let label = render_at(content, depth + 1);
                out.push_str(&style::fg(Color::Blue, &style::underline(&label)));
                out.push_str(&style::dim(&format!(" ({url})")));
            }
            Inline::Image { url, alt } => {
                let label = if alt.is_empty() { url } else { alt };
                out.push_str(&style::dim(&format!("[Image: {label}]")));
            }
            Inline::LineBreak => out.push('\n'),
        }
    }
    out
}

fn code_span(code: &str) -> String {
    style::bg_rgb(CODE_BG, &style::fg_rgb(CODE_FG, &format!(" {code} ")))
}
