//! Search over rendered lines.
//!
//! Matching is a case-insensitive substring test against the visible text of
//! each line; escape sequences never take part in a match. Folding maps each
//! char to one char so match positions line up with the original text.

use crate::render::text::{Segment, segments, strip_ansi};

const INVERSE_ON: &str = "\x1b[7m";
const INVERSE_OFF: &str = "\x1b[27m";

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold(s: &str) -> Vec<char> {
    s.chars().map(fold_char).collect()
}

/// Non-overlapping `[start, end)` char ranges of `needle` in `hay`, left to right.
fn match_ranges(hay: &[char], needle: &[char]) -> Vec<(usize, usize)> {
    let n = needle.len();
    let mut ranges = Vec::new();
    if n == 0 {
        return ranges;
    }
    let mut i = 0;
    while i + n <= hay.len() {
        if hay[i..i + n] == *needle {
            ranges.push((i, i + n));
            i += n;
        } else {
            i += 1;
        }
    }
    ranges
}

/// Indices of lines whose visible text contains `query`, ascending.
///
/// An empty query matches nothing.
pub fn find_matches(lines: &[String], query: &str) -> Vec<usize> {
    let needle = fold(query);
    if needle.is_empty() {
        return Vec::new();
    }
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !match_ranges(&fold(&strip_ansi(line)), &needle).is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// First match strictly after `offset`, wrapping to the first match.
pub fn next_match(matches: &[usize], offset: usize) -> Option<usize> {
    matches
        .iter()
        .find(|&&m| m > offset)
        .or_else(|| matches.first())
        .copied()
}

/// Last match strictly before `offset`, wrapping to the last match.
pub fn prev_match(matches: &[usize], offset: usize) -> Option<usize> {
    matches
        .iter()
        .rev()
        .find(|&&m| m < offset)
        .or_else(|| matches.last())
        .copied()
}

/// Wrap every occurrence of `query` in `line` with inverse video.
///
/// Escapes that fall inside a match are kept and inverse is re-asserted
/// after each of them.
pub fn highlight_matches(line: &str, query: &str) -> String {
    let needle = fold(query);
    let segs = segments(line);
    let hay: Vec<char> = segs
        .iter()
        .filter_map(|seg| match seg {
            Segment::Text(t) => Some(t.chars().map(fold_char)),
            Segment::Escape(_) => None,
        })
        .flatten()
        .collect();
    let ranges = match_ranges(&hay, &needle);
    if ranges.is_empty() {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + ranges.len() * 10);
    let mut ranges = ranges.into_iter().peekable();
    let mut idx = 0;
    let mut inside: Option<usize> = None;
    for seg in segs {
        match seg {
            Segment::Escape(esc) => {
                out.push_str(esc);
                if inside.is_some() {
                    out.push_str(INVERSE_ON);
                }
            }
            Segment::Text(t) => {
                for ch in t.chars() {
                    if inside.is_none() && ranges.peek().is_some_and(|&(start, _)| start == idx) {
                        out.push_str(INVERSE_ON);
                        inside = ranges.next().map(|(_, end)| end);
                    }
                    out.push(ch);
                    idx += 1;
                    if inside == Some(idx) {
                        out.push_str(INVERSE_OFF);
                        inside = None;
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_find_matches_case_insensitive() {
        let doc = lines(&["Hello", "world", "HELLO again", "nothing"]);
        assert_eq!(find_matches(&doc, "hello"), vec![0, 2]);
    }

    #[test]
    fn test_find_matches_ignores_escapes() {
        let doc = vec![style::bold("needle"), "\x1b[1mneedle".to_string()];
        assert_eq!(find_matches(&doc, "needle"), vec![0, 1]);
        // The "1m" of the escape is not visible text.
        assert!(find_matches(&doc, "1m").is_empty());
    }

    #[test]
    fn test_find_matches_spanning_styles() {
        let doc = vec![format!("ab{}", style::bold("cd"))];
        assert_eq!(find_matches(&doc, "bc"), vec![0]);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert!(find_matches(&lines(&["a"]), "").is_empty());
    }

    #[test]
    fn test_find_matches_is_idempotent() {
        let doc = lines(&["alpha", "beta", "alphabet"]);
        assert_eq!(find_matches(&doc, "alp"), find_matches(&doc, "alp"));
    }

    #[test]
    fn test_next_match_wraps() {
        let matches = [3, 10, 20];
        assert_eq!(next_match(&matches, 0), Some(3));
        assert_eq!(next_match(&matches, 3), Some(10));
        assert_eq!(next_match(&matches, 20), Some(3));
        assert_eq!(next_match(&[], 5), None);
    }

    #[test]
    fn test_prev_match_wraps() {
        let matches = [3, 10, 20];
        assert_eq!(prev_match(&matches, 15), Some(10));
        assert_eq!(prev_match(&matches, 10), Some(3));
        assert_eq!(prev_match(&matches, 3), Some(20));
        assert_eq!(prev_match(&[], 5), None);
    }

    #[test]
    fn test_next_then_prev_single_match_round_trips() {
        let matches = [7];
        let forward = next_match(&matches, 7).unwrap();
        assert_eq!(prev_match(&matches, forward), Some(7));
    }

    #[test]
    fn test_highlight_plain_line() {
        assert_eq!(
            highlight_matches("a Cat and a cat", "cat"),
            "a \x1b[7mCat\x1b[27m and a \x1b[7mcat\x1b[27m"
        );
    }

    #[test]
    fn test_highlight_without_match_is_unchanged() {
        assert_eq!(highlight_matches("plain", "zzz"), "plain");
        assert_eq!(highlight_matches("plain", ""), "plain");
    }

    #[test]
    fn test_highlight_reasserts_inverse_after_inner_escape() {
        let line = format!("x{}", style::bold("yz"));
        let out = highlight_matches(&line, "xy");
        assert_eq!(out, "\x1b[7mx\x1b[1m\x1b[7my\x1b[27mz\x1b[22m");
        assert_eq!(strip_ansi(&out), "xyz");
    }

    #[test]
    fn test_highlight_keeps_visible_text() {
        let line = style::fg(style::Color::Green, "Search me, SEARCH me");
        let out = highlight_matches(&line, "search");
        assert_eq!(strip_ansi(&out), strip_ansi(&line));
        assert_eq!(out.matches(INVERSE_ON).count(), 2);
    }
}
