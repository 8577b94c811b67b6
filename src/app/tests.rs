use std::io;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use crate::render::Renderer;

use super::session::Suspend;
use super::{App, Message, Mode, Model, update};

#[derive(Debug, Default)]
struct FakeSession {
    suspended: usize,
    resumed: usize,
}

impl Suspend for FakeSession {
    fn suspend(&mut self) -> io::Result<()> {
        self.suspended += 1;
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        self.resumed += 1;
        Ok(())
    }
}

fn numbered_lines(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Line {i}")).collect()
}

fn create_long_test_model() -> Model {
    Model::new(numbered_lines(100), (80, 25))
}

fn long_paragraph() -> String {
    "lorem ipsum dolor sit amet ".repeat(20)
}

/// A model holding the compiled source, set up the way `App::run` does.
fn start(app: &mut App, size: (u16, u16)) -> Model {
    let mut model = Model::new(Vec::new(), size)
        .with_file_path(app.file_path.clone())
        .with_max_width(app.max_width);
    let initial = app.recompile(model.wrap_width());
    app.dispatch(&mut model, &mut FakeSession::default(), initial)
        .unwrap();
    model
}

fn write_doc(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("doc.md");
    std::fs::write(&path, content).unwrap();
    path
}

fn script_editor(dir: &Path, body: &str) -> String {
    let script = dir.join("editor.sh");
    std::fs::write(&script, body).unwrap();
    format!("sh {}", script.display())
}

#[test]
fn test_scroll_down_updates_viewport() {
    let model = update(create_long_test_model(), Message::ScrollDown(5));
    assert_eq!(model.viewport.offset(), 5);
}

#[test]
fn test_scroll_up_updates_viewport() {
    let mut model = create_long_test_model();
    model.viewport.scroll_down(10);
    let model = update(model, Message::ScrollUp(3));
    assert_eq!(model.viewport.offset(), 7);
}

#[test]
fn test_page_down_and_bottom() {
    let model = update(create_long_test_model(), Message::PageDown);
    assert_eq!(model.viewport.offset(), 24);
    let model = update(model, Message::GoToBottom);
    assert_eq!(model.viewport.offset(), 76);
    let model = update(model, Message::GoToTop);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_search_entry_collects_input() {
    let mut model = update(create_long_test_model(), Message::StartSearch);
    assert_eq!(model.mode, Mode::SearchEntry);
    for c in "Line 5x".chars() {
        model = update(model, Message::SearchChar(c));
    }
    let model = update(model, Message::SearchBackspace);
    assert_eq!(model.search_input, "Line 5");
}

#[test]
fn test_search_char_ignored_outside_entry() {
    let model = update(create_long_test_model(), Message::SearchChar('x'));
    assert!(model.search_input.is_empty());
}

#[test]
fn test_search_commit_jumps_to_first_match() {
    let mut model = update(create_long_test_model(), Message::StartSearch);
    for c in "line 42".chars() {
        model = update(model, Message::SearchChar(c));
    }
    let model = update(model, Message::SearchCommit);
    assert_eq!(model.mode, Mode::Normal);
    assert_eq!(model.search_query, "line 42");
    assert_eq!(model.search_matches, vec![42]);
    assert_eq!(model.viewport.offset(), 42);
    assert!(model.search_input.is_empty());
}

#[test]
fn test_search_commit_clamps_late_match() {
    let mut model = update(create_long_test_model(), Message::StartSearch);
    for c in "Line 99".chars() {
        model = update(model, Message::SearchChar(c));
    }
    let model = update(model, Message::SearchCommit);
    assert_eq!(model.viewport.offset(), model.viewport.max_scroll());
}

#[test]
fn test_search_without_matches_keeps_position() {
    let mut model = create_long_test_model();
    model.viewport.scroll_down(10);
    let mut model = update(model, Message::StartSearch);
    model = update(model, Message::SearchChar('z'));
    let model = update(model, Message::SearchCommit);
    assert!(model.search_matches.is_empty());
    assert_eq!(model.viewport.offset(), 10);
}

#[test]
fn test_search_cancel_keeps_previous_query() {
    let mut model = create_long_test_model();
    model.search_query = "Line 1".to_string();
    let mut model = update(model, Message::StartSearch);
    model = update(model, Message::SearchChar('q'));
    let model = update(model, Message::SearchCancel);
    assert_eq!(model.mode, Mode::Normal);
    assert!(model.search_input.is_empty());
    assert_eq!(model.search_query, "Line 1");
}

#[test]
fn test_next_and_prev_match_wrap_around() {
    let mut model = Model::new(numbered_lines(100), (80, 11));
    model.search_query = "Line 1".to_string();
    model.search_matches = crate::search::find_matches(&model.lines, "Line 1");
    // 1, 10..=19
    model.viewport.go_to_line(19);

    let model = update(model, Message::NextMatch);
    assert_eq!(model.viewport.offset(), 1);
    let model = update(model, Message::NextMatch);
    assert_eq!(model.viewport.offset(), 10);
    let model = update(model, Message::PrevMatch);
    assert_eq!(model.viewport.offset(), 1);
    let model = update(model, Message::PrevMatch);
    assert_eq!(model.viewport.offset(), 19);
}

fn commit_search(model: Model, query: &str) -> Model {
    let mut model = update(model, Message::StartSearch);
    for c in query.chars() {
        model = update(model, Message::SearchChar(c));
    }
    update(model, Message::SearchCommit)
}

#[test]
fn test_repeated_search_is_idempotent() {
    let first = commit_search(create_long_test_model(), "line 3");
    let matches = first.search_matches.clone();
    let offset = first.viewport.offset();

    let second = commit_search(first, "line 3");
    assert_eq!(second.search_matches, matches);
    assert_eq!(second.viewport.offset(), offset);
}

#[test]
fn test_next_then_prev_with_single_match_returns() {
    let model = commit_search(create_long_test_model(), "line 42");
    assert_eq!(model.viewport.offset(), 42);
    let model = update(model, Message::NextMatch);
    assert_eq!(model.viewport.offset(), 42);
    let model = update(model, Message::PrevMatch);
    assert_eq!(model.viewport.offset(), 42);
}

#[test]
fn test_next_match_without_query_is_noop() {
    let mut model = create_long_test_model();
    model.viewport.scroll_down(3);
    let model = update(model, Message::NextMatch);
    assert_eq!(model.viewport.offset(), 3);
}

#[test]
fn test_resize_clamps_offset() {
    let mut model = create_long_test_model();
    model.viewport.go_to_bottom();
    let model = update(model, Message::Resize(80, 51));
    assert_eq!(model.viewport.view_height(), 50);
    assert_eq!(model.viewport.offset(), 50);
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_long_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_recompiled_replaces_lines_and_refreshes_matches() {
    let mut model = create_long_test_model();
    model.search_query = "new".to_string();
    let model = update(
        model,
        Message::Recompiled {
            lines: vec!["old".to_string(), "new".to_string()],
            width: 80,
        },
    );
    assert_eq!(model.lines.len(), 2);
    assert_eq!(model.viewport.total_lines(), 2);
    assert_eq!(model.search_matches, vec![1]);
}

#[test]
fn test_resize_to_new_width_recompiles() {
    let mut app = App::new(long_paragraph(), Renderer::default());
    let mut model = start(&mut app, (80, 24));
    let wide = model.lines.len();

    app.dispatch(&mut model, &mut FakeSession::default(), Message::Resize(30, 24))
        .unwrap();
    assert_eq!(model.rendered_width, 30);
    assert!(model.lines.len() > wide);
    assert_eq!(model.lines, app.renderer.compile(app.source(), 30));
}

#[test]
fn test_resize_height_only_keeps_lines() {
    let mut app = App::new(long_paragraph(), Renderer::default());
    let mut model = start(&mut app, (80, 24));
    let before = model.lines.clone();

    app.dispatch(&mut model, &mut FakeSession::default(), Message::Resize(80, 10))
        .unwrap();
    assert_eq!(model.lines, before);
    assert_eq!(model.viewport.rows(), 10);
}

#[test]
fn test_max_width_caps_compile_width() {
    let mut app = App::new(long_paragraph(), Renderer::default()).with_max_width(Some(40));
    let mut model = start(&mut app, (120, 24));
    assert_eq!(model.rendered_width, 40);

    app.dispatch(&mut model, &mut FakeSession::default(), Message::Resize(100, 24))
        .unwrap();
    assert_eq!(model.rendered_width, 40);
}

#[test]
fn test_edit_without_file_does_nothing() {
    let mut app = App::new("# Piped".to_string(), Renderer::default());
    let mut model = start(&mut app, (80, 24));
    let mut session = FakeSession::default();
    app.dispatch(&mut model, &mut session, Message::EditFile)
        .unwrap();
    assert_eq!(session.suspended, 0);
}

#[cfg(unix)]
#[test]
fn test_edit_reloads_changed_file() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "Original body\n");
    let editor = script_editor(
        dir.path(),
        "printf 'Edited body\\n\\nSecond paragraph\\n' > \"$1\"\n",
    );
    let mut app = App::new("Original body\n".to_string(), Renderer::default())
        .with_file_path(Some(path))
        .with_editor(Some(editor));
    let mut model = start(&mut app, (80, 24));
    let mut session = FakeSession::default();

    app.dispatch(&mut model, &mut session, Message::EditFile)
        .unwrap();

    assert_eq!(session.suspended, 1);
    assert_eq!(session.resumed, 1);
    assert_eq!(app.source(), "Edited body\n\nSecond paragraph\n");
    assert_eq!(model.lines, app.renderer.compile(app.source(), 80));
    assert!(model.lines.iter().any(|l| l.contains("Second paragraph")));
}

#[cfg(unix)]
#[test]
fn test_failing_editor_still_reloads() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "Body\n");
    let editor = script_editor(dir.path(), "printf 'Saved anyway\\n' > \"$1\"\nexit 3\n");
    let mut app = App::new("Body\n".to_string(), Renderer::default())
        .with_file_path(Some(path))
        .with_editor(Some(editor));
    let mut model = start(&mut app, (80, 24));
    let mut session = FakeSession::default();

    app.dispatch(&mut model, &mut session, Message::EditFile)
        .unwrap();

    assert_eq!(session.resumed, 1);
    assert!(model.lines.iter().any(|l| l.contains("Saved anyway")));
}

#[test]
fn test_missing_editor_keeps_document() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "Body text\n");
    let mut app = App::new("Body text\n".to_string(), Renderer::default())
        .with_file_path(Some(path))
        .with_editor(Some("glyphmd-test-no-such-editor".to_string()));
    let mut model = start(&mut app, (80, 24));
    let before = model.lines.clone();
    let mut session = FakeSession::default();

    app.dispatch(&mut model, &mut session, Message::EditFile)
        .unwrap();

    assert_eq!(session.suspended, 1);
    assert_eq!(session.resumed, 1);
    assert_eq!(model.lines, before);
}

#[cfg(unix)]
#[test]
fn test_failed_reload_keeps_previous_lines() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "Body text\n");
    let editor = script_editor(dir.path(), "rm \"$1\"\n");
    let mut app = App::new("Body text\n".to_string(), Renderer::default())
        .with_file_path(Some(path))
        .with_editor(Some(editor));
    let mut model = start(&mut app, (80, 24));
    let before = model.lines.clone();

    app.dispatch(&mut model, &mut FakeSession::default(), Message::EditFile)
        .unwrap();

    assert_eq!(model.lines, before);
    assert_eq!(app.source(), "Body text\n");
}

#[cfg(unix)]
#[test]
fn test_edit_keeps_active_search_current() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "alpha\n");
    let editor = script_editor(dir.path(), "printf 'beta\\n\\nalpha again\\n' > \"$1\"\n");
    let mut app = App::new("alpha\n".to_string(), Renderer::default())
        .with_file_path(Some(path))
        .with_editor(Some(editor));
    let mut model = start(&mut app, (80, 24));
    model.search_query = "alpha".to_string();

    app.dispatch(&mut model, &mut FakeSession::default(), Message::EditFile)
        .unwrap();

    let expected = crate::search::find_matches(&model.lines, "alpha");
    assert_eq!(model.search_matches, expected);
    assert_eq!(model.search_matches.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_emptied_file_reloads_as_empty_document() {
    let dir = tempdir().unwrap();
    let path = write_doc(dir.path(), "Body text\n");
    let editor = script_editor(dir.path(), ": > \"$1\"\n");
    let mut app = App::new("Body text\n".to_string(), Renderer::default())
        .with_file_path(Some(path))
        .with_editor(Some(editor));
    let mut model = start(&mut app, (80, 24));
    model = update(model, Message::ScrollDown(5));

    app.dispatch(&mut model, &mut FakeSession::default(), Message::EditFile)
        .unwrap();

    assert_eq!(app.source(), "");
    assert!(model.lines.is_empty());
    assert_eq!(model.viewport.offset(), 0);
}
