use tracing::debug;

use crate::app::Model;
use crate::app::model::Mode;
use crate::search::{next_match, prev_match};

/// All possible events and actions in the pager.
///
/// These represent user input, terminal events, and results of side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,

    // Search
    /// Enter search mode with an empty input buffer
    StartSearch,
    /// Append a character to the search input
    SearchChar(char),
    /// Remove the last character of the search input
    SearchBackspace,
    /// Commit the input as the active query
    SearchCommit,
    /// Leave search mode, keeping the previous query
    SearchCancel,
    /// Go to next search match
    NextMatch,
    /// Go to previous search match
    PrevMatch,

    // Terminal and document
    /// Terminal resized to (cols, rows)
    Resize(u16, u16),
    /// Open the backing file in the external editor
    EditFile,
    /// Lines recompiled at the given width
    Recompiled { lines: Vec<String>, width: usize },

    // Application
    /// Quit the pager
    Quit,
}

/// Pure state transition.
///
/// Side effects (editor, recompiling) are handled by the event loop after
/// the transition; their results come back as messages.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::StartSearch => {
            model.mode = Mode::SearchEntry;
            model.search_input.clear();
        }
        Message::SearchChar(c) => {
            if model.mode == Mode::SearchEntry {
                model.search_input.push(c);
            }
        }
        Message::SearchBackspace => {
            if model.mode == Mode::SearchEntry {
                model.search_input.pop();
            }
        }
        Message::SearchCommit => {
            if model.mode == Mode::SearchEntry {
                model.mode = Mode::Normal;
                model.search_query = std::mem::take(&mut model.search_input);
                model.refresh_search_matches();
                debug!(
                    query = %model.search_query,
                    matches = model.search_matches.len(),
                    "search committed"
                );
                if let Some(&first) = model.search_matches.first() {
                    model.viewport.go_to_line(first);
                }
            }
        }
        Message::SearchCancel => {
            model.mode = Mode::Normal;
            model.search_input.clear();
        }
        Message::NextMatch => {
            if model.has_query()
                && let Some(line) = next_match(&model.search_matches, model.viewport.offset())
            {
                model.viewport.go_to_line(line);
            }
        }
        Message::PrevMatch => {
            if model.has_query()
                && let Some(line) = prev_match(&model.search_matches, model.viewport.offset())
            {
                model.viewport.go_to_line(line);
            }
        }

        Message::Resize(cols, rows) => {
            debug!(cols, rows, "resize");
            model.viewport.resize(cols, rows);
        }
        // Handled as a side effect.
        Message::EditFile => {}
        Message::Recompiled { lines, width } => model.set_lines(lines, width),

        Message::Quit => model.should_quit = true,
    }
    model
}
