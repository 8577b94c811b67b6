//! Translating terminal events into [`Message`]s.
//!
//! crossterm decodes the raw byte stream, including telling a lone `Esc`
//! apart from the start of an arrow or page key sequence, so this layer only
//! sees whole keys.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Model;
use crate::app::model::Mode;
use crate::app::Message;

/// Map one terminal event to a message, or `None` to ignore it.
pub fn handle_event(event: &Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) => handle_key(*key, model),
        Event::Resize(cols, rows) => Some(Message::Resize(*cols, *rows)),
        _ => None,
    }
}

pub fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }
    match model.mode {
        Mode::SearchEntry => handle_search_key(key, ctrl),
        Mode::Normal if ctrl => None,
        Mode::Normal => handle_normal_key(key, model),
    }
}

fn handle_search_key(key: KeyEvent, ctrl: bool) -> Option<Message> {
    match key.code {
        KeyCode::Enter => Some(Message::SearchCommit),
        KeyCode::Esc => Some(Message::SearchCancel),
        KeyCode::Backspace => Some(Message::SearchBackspace),
        KeyCode::Char(c) if !ctrl && !c.is_control() => Some(Message::SearchChar(c)),
        _ => None,
    }
}

fn handle_normal_key(key: KeyEvent, model: &Model) -> Option<Message> {
    match key.code {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Message::ScrollUp(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::ScrollDown(1)),
        KeyCode::PageUp | KeyCode::Char('b') => Some(Message::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Message::GoToTop),
        KeyCode::End | KeyCode::Char('G') => Some(Message::GoToBottom),
        KeyCode::Char('/') => Some(Message::StartSearch),
        KeyCode::Char('n') => Some(Message::NextMatch),
        KeyCode::Char('N') => Some(Message::PrevMatch),
        KeyCode::Char('E' | 'v') if model.can_edit() => Some(Message::EditFile),
        _ => None,
    }
}
