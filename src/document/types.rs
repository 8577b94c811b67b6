//! Core document types.
//!
//! The tree is produced once by the parser and never mutated afterwards.
//! Every node kind is a closed enum so the renderers can match exhaustively.

/// One structural unit of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX or setext heading, `level` in `1..=6`
    Heading { level: u8, content: Vec<Inline> },
    /// Paragraph of inline content
    Paragraph(Vec<Inline>),
    /// Fenced or indented code
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    /// Block quote with arbitrary child blocks
    BlockQuote(Vec<Block>),
    /// Ordered or bullet list
    List(List),
    /// GFM table
    Table(Table),
    /// Thematic break
    HorizontalRule,
    /// Raw passthrough (HTML blocks)
    Raw(String),
    /// Explicit vertical space between blocks
    Blank,
}

/// A span-level unit inside a paragraph, heading, table cell, or list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Code(String),
    Link { url: String, content: Vec<Inline> },
    Image { url: String, alt: String },
    LineBreak,
    /// Literal text that must not be re-interpreted (inline HTML, escapes)
    Escaped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    /// First number of an ordered list
    pub start: Option<usize>,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// `Some(checked)` for GFM task items
    pub task: Option<bool>,
    pub blocks: Vec<Block>,
}

impl ListItem {
    /// A plain item holding a single paragraph.
    pub fn text(content: Vec<Inline>) -> Self {
        Self {
            task: None,
            blocks: vec![Block::Paragraph(content)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
    pub alignments: Vec<Alignment>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Concatenate the literal text of inline nodes, dropping all styling.
///
/// Line breaks become a single space; images contribute their alt text.
pub fn plain_text(nodes: &[Inline]) -> String {
    let mut out = String::new();
    // Iterative walk keeps pathological nesting off the call stack.
    let mut stack: Vec<&Inline> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            Inline::Text(t) | Inline::Code(t) | Inline::Escaped(t) => out.push_str(t),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::LineBreak => out.push(' '),
            Inline::Strong(children)
            | Inline::Emphasis(children)
            | Inline::Strikethrough(children)
            | Inline::Link {
                content: children, ..
            } => stack.extend(children.iter().rev()),
        }
    }
    out
}
