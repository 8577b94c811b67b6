//! Markdown parsing with comrak.
//!
//! Comrak produces an arena-allocated AST; this module lowers it into the
//! owned [`Block`]/[`Inline`] tree the renderers consume.

use std::borrow::Cow;

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};

use super::types::{Alignment, Block, Inline, List, ListItem, Table};

/// Inline nesting deeper than this is flattened to plain text.
pub const MAX_INLINE_DEPTH: usize = 32;
/// Block nesting (quotes, lists) deeper than this is flattened to plain text.
pub const MAX_BLOCK_DEPTH: usize = 32;

/// Parse markdown source into a block tree.
///
/// # Example
///
/// ```
/// use glyphmd::document::{Block, parse};
///
/// let blocks = parse("# Hello\n\nWorld");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
/// ```
pub fn parse(source: &str) -> Vec<Block> {
    let source = neutralize_controls(source);
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, &source, &options);

    let mut blocks = Vec::new();
    let mut previous_end: Option<usize> = None;
    for child in root.children() {
        let (start, end) = {
            let data = child.data.borrow();
            (data.sourcepos.start.line, data.sourcepos.end.line)
        };
        // Two or more blank source lines between blocks keep one extra row.
        if previous_end.is_some_and(|prev| start > prev + 2) {
            blocks.push(Block::Blank);
        }
        convert_block(child, 0, &mut blocks);
        previous_end = Some(end);
    }
    blocks
}

/// Replace terminal control characters with visible stand-ins.
///
/// C0 controls other than tab, line feed and carriage return become their
/// Unicode control pictures, so `ESC` shows as `␛`. DEL and C1 controls
/// become U+FFFD.
pub fn neutralize_controls(source: &str) -> Cow<'_, str> {
    let is_unsafe = |c: char| c.is_control() && !matches!(c, '\t' | '\n' | '\r');
    if !source.contains(is_unsafe) {
        return Cow::Borrowed(source);
    }
    Cow::Owned(
        source
            .chars()
            .map(|c| match c {
                c if !is_unsafe(c) => c,
                '\u{0}'..='\u{1f}' => char::from_u32(0x2400 + u32::from(c)).unwrap_or('\u{fffd}'),
                '\u{7f}' => '\u{2421}',
                _ => '\u{fffd}',
            })
            .collect(),
    )
}

fn create_options() -> Options {
    let mut options = Options::default();

    // GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.superscript = true;
    options.extension.shortcodes = true;

    options
}

fn convert_block<'a>(node: &'a AstNode<'a>, depth: usize, out: &mut Vec<Block>) {
    if depth > MAX_BLOCK_DEPTH {
        let text = extract_text(node);
        if !text.is_empty() {
            out.push(Block::Paragraph(vec![Inline::Text(text)]));
        }
        return;
    }

    match &node.data.borrow().value {
        NodeValue::Heading(heading) => out.push(Block::Heading {
            level: heading.level.clamp(1, 6),
            content: convert_inlines(node, 0),
        }),

        NodeValue::Paragraph => out.push(Block::Paragraph(convert_inlines(node, 0))),

        NodeValue::CodeBlock(code_block) => {
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .filter(|s| !s.is_empty())
                .map(ToString::to_string);
            out.push(Block::CodeBlock {
                language,
                code: code_block.literal.clone(),
            });
        }

        NodeValue::BlockQuote => {
            let mut children = Vec::new();
            for child in node.children() {
                convert_block(child, depth + 1, &mut children);
            }
            out.push(Block::BlockQuote(children));
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let items = node
                .children()
                .map(|item| convert_item(item, depth + 1))
                .collect();
            out.push(Block::List(List {
                ordered,
                start: ordered.then_some(list.start),
                items,
            }));
        }

        NodeValue::Table(table) => {
            let alignments = table.alignments.iter().map(|a| convert_alignment(*a)).collect();
            out.push(Block::Table(convert_table(node, alignments)));
        }

        NodeValue::ThematicBreak => out.push(Block::HorizontalRule),

        NodeValue::HtmlBlock(html) => {
            out.push(Block::Raw(html.literal.trim_end_matches('\n').to_string()));
        }

        NodeValue::FootnoteDefinition(def) => {
            let label = Inline::Text(format!("[^{}]: ", def.name));
            let mut children = Vec::new();
            for child in node.children() {
                convert_block(child, depth + 1, &mut children);
            }
            match children.first_mut() {
                Some(Block::Paragraph(content)) => content.insert(0, label),
                _ => children.insert(0, Block::Paragraph(vec![label])),
            }
            out.extend(children);
        }

        _ => {
            // Containers we do not model keep their children.
            for child in node.children() {
                convert_block(child, depth, out);
            }
        }
    }
}

fn convert_item<'a>(node: &'a AstNode<'a>, depth: usize) -> ListItem {
    let task = match &node.data.borrow().value {
        NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
        _ => None,
    };
    let mut blocks = Vec::new();
    for child in node.children() {
        convert_block(child, depth, &mut blocks);
    }
    ListItem { task, blocks }
}

fn convert_table<'a>(node: &'a AstNode<'a>, alignments: Vec<Alignment>) -> Table {
    let mut header = Vec::new();
    let mut rows = Vec::new();
    for row_node in node.children() {
        let is_header = match row_node.data.borrow().value {
            NodeValue::TableRow(is_header) => is_header,
            _ => continue,
        };
        let cells: Vec<Vec<Inline>> = row_node
            .children()
            .filter(|cell| matches!(cell.data.borrow().value, NodeValue::TableCell))
            .map(|cell| convert_inlines(cell, 0))
            .collect();
        if is_header && header.is_empty() {
            header = cells;
        } else {
            rows.push(cells);
        }
    }
    Table {
        header,
        rows,
        alignments,
    }
}

const fn convert_alignment(alignment: TableAlignment) -> Alignment {
    match alignment {
        TableAlignment::None => Alignment::None,
        TableAlignment::Left => Alignment::Left,
        TableAlignment::Center => Alignment::Center,
        TableAlignment::Right => Alignment::Right,
    }
}

fn convert_inlines<'a>(node: &'a AstNode<'a>, depth: usize) -> Vec<Inline> {
    let mut out = Vec::new();
    for child in node.children() {
        convert_inline(child, depth, &mut out);
    }
    out
}

fn convert_inline<'a>(node: &'a AstNode<'a>, depth: usize, out: &mut Vec<Inline>) {
    if depth > MAX_INLINE_DEPTH {
        out.push(Inline::Text(extract_text(node)));
        return;
    }

    match &node.data.borrow().value {
        NodeValue::Text(t) => out.push(Inline::Text(t.to_string())),
        NodeValue::SoftBreak => out.push(Inline::Text(" ".to_string())),
        NodeValue::LineBreak => out.push(Inline::LineBreak),
        NodeValue::Code(code) => out.push(Inline::Code(code.literal.clone())),
        NodeValue::Emph => out.push(Inline::Emphasis(convert_inlines(node, depth + 1))),
        NodeValue::Strong => out.push(Inline::Strong(convert_inlines(node, depth + 1))),
        NodeValue::Strikethrough => {
            out.push(Inline::Strikethrough(convert_inlines(node, depth + 1)));
        }
        NodeValue::Link(link) => out.push(Inline::Link {
            url: link.url.clone(),
            content: convert_inlines(node, depth + 1),
        }),
        NodeValue::Image(link) => out.push(Inline::Image {
            url: link.url.clone(),
            alt: extract_text(node),
        }),
        NodeValue::HtmlInline(html) => out.push(Inline::Escaped(html.clone())),
        NodeValue::ShortCode(short) => out.push(Inline::Text(short.emoji.clone())),
        NodeValue::FootnoteReference(reference) => {
            out.push(Inline::Text(format!("[^{}]", reference.name)));
        }
        NodeValue::Superscript => out.push(Inline::Text(format!("^{}", extract_text(node)))),
        // Nested blocks inside list items are handled at block level.
        NodeValue::List(_) | NodeValue::Item(_) | NodeValue::TaskItem(_) => {}
        _ => {
            for child in node.children() {
                convert_inline(child, depth, out);
            }
        }
    }
}

/// Literal text of a subtree, walked without recursion.
fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        match &descendant.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(c) => text.push_str(&c.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
