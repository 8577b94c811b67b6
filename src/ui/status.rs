use crate::app::Model;
use crate::app::model::Mode;

/// Text of the status row, before padding.
///
/// Shows the search prompt while typing a query, the match summary while a
/// query is active, and the scroll position otherwise.
pub fn status_text(model: &Model) -> String {
    if model.mode == Mode::SearchEntry {
        return format!("/{}", model.search_input);
    }
    if model.has_query() {
        return format!(
            " \"{}\" {} matches | n/N:next/prev | q:quit ",
            model.search_query,
            model.search_matches.len()
        );
    }

    let vp = &model.viewport;
    let range = vp.visible_range();
    let (start, end) = if range.is_empty() {
        (0, 0)
    } else {
        (range.start + 1, range.end)
    };
    let edit_hint = if model.can_edit() { "  E:edit" } else { "" };
    format!(
        " {start}-{end}/{} ({}%) | j/k:scroll  /:search{edit_hint}  q:quit ",
        vp.total_lines(),
        vp.scroll_percent()
    )
}
