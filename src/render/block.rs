//! Block-level rendering: one block in, zero or more terminal lines out.

use tracing::debug;

use crate::document::{Alignment, Block, Inline, List, MAX_BLOCK_DEPTH, Table, plain_text};

use super::inline::render_inline;
use super::style::{self, Color};
use super::text::{expand_tabs, pad_right, truncate, visible_width, wrap};
use super::Renderer;

/// Columns taken by a quote's left bar plus its right margin.
const QUOTE_INSET: usize = 4;
const QUOTE_BAR: &str = "│ ";
const LIST_INDENT: &str = "  ";
const TAB_WIDTH: usize = 4;

fn gray(s: &str) -> String {
    style::fg(Color::Gray, s)
}

fn framed(mut lines: Vec<String>) -> Vec<String> {
    lines.insert(0, String::new());
    lines.push(String::new());
    lines
}

/// Prefix a line, leaving empty lines empty.
fn indented(prefix: &str, line: &str) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{prefix}{line}")
    }
}

impl Renderer {
    /// Render a single block at the given wrap width.
    pub fn render_block(&self, block: &Block, width: usize) -> Vec<String> {
        self.render_at(block, width.max(1), 0)
    }

    fn render_at(&self, block: &Block, width: usize, depth: usize) -> Vec<String> {
        self.render_nested(block, width, depth, 0)
    }

    /// `depth` bounds recursion; `list_depth` counts enclosing list items
    /// and only sets list indentation.
    fn render_nested(
        &self,
        block: &Block,
        width: usize,
        depth: usize,
        list_depth: usize,
    ) -> Vec<String> {
        if depth > MAX_BLOCK_DEPTH {
            return wrap(&block_text(block), width);
        }
        match block {
            Block::Heading { level, content } => self.render_heading(*level, content, width),
            Block::Paragraph(content) => wrap(&render_inline(content), width),
            Block::CodeBlock { language, code } => {
                self.render_code(language.as_deref(), code, width)
            }
            Block::BlockQuote(children) => self.render_quote(children, width, depth),
            Block::List(list) => self.render_list(list, width, depth, list_depth),
            Block::Table(table) => render_table(table),
            Block::HorizontalRule => framed(vec![style::dim(&"─".repeat(width))]),
            Block::Raw(text) => expand_tabs(text, TAB_WIDTH).lines().map(style::dim).collect(),
            Block::Blank => vec![String::new()],
        }
    }

    fn render_heading(&self, level: u8, content: &[Inline], width: usize) -> Vec<String> {
        let text = plain_text(content);
        match level {
            1 => {
                let title = |s: &str| style::bold(&style::fg(Color::Cyan, s));
                match self.banner.render(&text) {
                    Ok(art) if art.iter().all(|l| visible_width(l) <= width) => {
                        framed(art.iter().map(|l| title(l)).collect())
                    }
                    Ok(_) => {
                        debug!(heading = %text, "banner wider than {width} columns, using plain text");
                        framed(wrap(&title(&text), width))
                    }
                    Err(err) => {
                        debug!(heading = %text, error = %err, "banner failed, using plain text");
                        framed(wrap(&title(&text), width))
                    }
                }
            }
            2 => {
                let inner = format!(" {text} ");
                let bar = "═".repeat(visible_width(&inner) + 2);
                framed(vec![
                    style::fg(Color::Green, &format!("╔{bar}╗")),
                    format!(
                        "{}{}{}",
                        style::fg(Color::Green, "║ "),
                        style::bold(&style::fg(Color::Green, &inner)),
                        style::fg(Color::Green, " ║")
                    ),
                    style::fg(Color::Green, &format!("╚{bar}╝")),
                ])
            }
            3 => framed(wrap(
                &style::bold(&style::fg(Color::Cyan, &style::underline(&text))),
                width,
            )),
            4 => framed(wrap(&style::bold(&style::fg(Color::Yellow, &text)), width)),
            5 => framed(wrap(&style::bold(&style::dim(&text)), width)),
            _ => framed(wrap(&style::dim(&style::underline(&text)), width)),
        }
    }

    fn render_code(&self, language: Option<&str>, code: &str, width: usize) -> Vec<String> {
        let code = expand_tabs(code.strip_suffix('\n').unwrap_or(code), TAB_WIDTH);
        let mut code_lines = match self.highlighter.highlight(&code, language) {
            Ok(lines) => lines,
            Err(err) => {
                debug!(language = ?language, error = %err, "highlighting failed, using plain text");
                code.split('\n').map(ToString::to_string).collect()
            }
        };
        if code_lines.is_empty() {
            code_lines.push(String::new());
        }

        let lang = language.unwrap_or_default();
        let lang_width = visible_width(lang);
        let max_len = code_lines
            .iter()
            .map(|l| visible_width(l))
            .max()
            .unwrap_or(0)
            .max(lang_width);
        let box_width = (max_len + 4).min(width).max(4);
        let inner = box_width - 4;
        let rule = "─".repeat(box_width - 2);

        let mut lines = Vec::with_capacity(code_lines.len() + 4);
        lines.push(gray(&format!("╭{rule}╮")));
        if !lang.is_empty() {
            let label = truncate(lang, inner);
            lines.push(format!(
                "{}{}{}",
                gray(QUOTE_BAR),
                pad_right(&style::dim(&style::italic(&label)), inner),
                gray(" │")
            ));
            lines.push(gray(&format!("│{rule}│")));
        }
        for line in &code_lines {
            lines.push(format!(
                "{}{}{}",
                gray(QUOTE_BAR),
                pad_right(&truncate(line, inner), inner),
                gray(" │")
            ));
        }
        lines.push(gray(&format!("╰{rule}╯")));
        lines
    }

    fn render_quote(&self, children: &[Block], width: usize, depth: usize) -> Vec<String> {
        let bar = gray(QUOTE_BAR);
        let mut lines = Vec::new();
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                lines.push(gray("│"));
            }
            match child {
                Block::Paragraph(content) => {
                    let text = render_inline(content);
                    let inner = width.saturating_sub(QUOTE_INSET).max(1);
                    for line in wrap(&text, inner) {
                        lines.push(format!("{bar}{}", style::italic(&line)));
                    }
                }
                other => {
                    let inner = width.saturating_sub(visible_width(QUOTE_BAR)).max(1);
                    for line in self.render_at(other, inner, depth + 1) {
                        lines.push(format!("{bar}{line}"));
                    }
                }
            }
        }
        lines
    }

    fn render_list(
        &self,
        list: &List,
        width: usize,
        depth: usize,
        list_depth: usize,
    ) -> Vec<String> {
        let indent = LIST_INDENT.repeat(list_depth);
        let start = list.start.unwrap_or(1);
        let mut lines = Vec::new();

        for (i, item) in list.items.iter().enumerate() {
            let marker = if list.ordered {
                format!("{}. ", start + i)
            } else {
                "• ".to_string()
            };
            let checkbox = match item.task {
                Some(true) => "[x] ",
                Some(false) => "[ ] ",
                None => "",
            };
            let lead = format!("{indent}{marker}{checkbox}");
            let text_width = width.saturating_sub(visible_width(&lead)).max(1);

            let mut item_lines = ItemLines::new(&lead, &mut lines);
            for child in &item.blocks {
                match child {
                    Block::Paragraph(content) => {
                        for line in wrap(&render_inline(content), text_width) {
                            item_lines.push(&line);
                        }
                    }
                    Block::List(_) => {
                        item_lines.start();
                        let nested = self.render_nested(child, width, depth + 1, list_depth + 1);
                        item_lines.lines.extend(nested);
                    }
                    other => {
                        for line in self.render_at(other, text_width, depth + 1) {
                            item_lines.push(&line);
                        }
                    }
                }
            }
            item_lines.start();
        }
        lines
    }
}

/// Lines of one list item: the marker goes on the first line only, later
/// lines are indented to the content column.
struct ItemLines<'a> {
    lead: &'a str,
    content_col: String,
    first: bool,
    lines: &'a mut Vec<String>,
}

impl<'a> ItemLines<'a> {
    fn new(lead: &'a str, lines: &'a mut Vec<String>) -> Self {
        Self {
            lead,
            content_col: " ".repeat(visible_width(lead)),
            first: true,
            lines,
        }
    }

    fn push(&mut self, line: &str) {
        if self.first {
            self.lines.push(format!("{}{line}", self.lead));
            self.first = false;
        } else {
            self.lines.push(indented(&self.content_col, line));
        }
    }

    /// Emit the marker line if nothing has been pushed yet.
    fn start(&mut self) {
        if self.first {
            self.push("");
        }
    }
}

fn render_table(table: &Table) -> Vec<String> {
    let cell_text = |cell: &[Inline]| render_inline(cell).replace('\n', " ");
    let header: Vec<String> = table.header.iter().map(|c| cell_text(c)).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| cell_text(c)).collect())
        .collect();

    let cols = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0; cols];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (c, cell) in row.iter().enumerate() {
            widths[c] = widths[c].max(visible_width(cell));
        }
    }

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };
    let render_row = |cells: &[String], bold: bool| {
        let content = widths
            .iter()
            .enumerate()
            .map(|(c, w)| {
                let cell = cells.get(c).map_or("", String::as_str);
                let align = table.alignments.get(c).copied().unwrap_or_default();
                format!(" {} ", pad_cell(cell, *w, align))
            })
            .collect::<Vec<_>>()
            .join("│");
        if bold {
            format!("│{}│", style::bold(&content))
        } else {
            format!("│{content}│")
        }
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border("┌", "┬", "┐"));
    lines.push(render_row(&header, true));
    lines.push(border("├", "┼", "┤"));
    for row in &rows {
        lines.push(render_row(row, false));
    }
    lines.push(border("└", "┴", "┘"));
    lines
}

fn pad_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let diff = width.saturating_sub(visible_width(text));
    match alignment {
        Alignment::Right => format!("{}{text}", " ".repeat(diff)),
        Alignment::Center => {
            let left = diff / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(diff - left))
        }
        Alignment::Left | Alignment::None => format!("{text}{}", " ".repeat(diff)),
    }
}

/// Plain text of a whole block subtree, walked without recursion.
fn block_text(block: &Block) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut stack = vec![block];
    while let Some(block) = stack.pop() {
        match block {
            Block::Heading { content, .. } | Block::Paragraph(content) => {
                parts.push(plain_text(content));
            }
            Block::CodeBlock { code, .. } | Block::Raw(code) => parts.push(code.clone()),
            Block::BlockQuote(children) => stack.extend(children.iter().rev()),
            Block::List(list) => {
                for item in list.items.iter().rev() {
                    stack.extend(item.blocks.iter().rev());
                }
            }
            Block::Table(table) => {
                for row in std::iter::once(&table.header).chain(table.rows.iter()) {
                    let cells: Vec<String> = row.iter().map(|c| plain_text(c)).collect();
                    parts.push(cells.join(" "));
                }
            }
            Block::HorizontalRule | Block::Blank => {}
        }
    }
    parts.join(" ")
}
