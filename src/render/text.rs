//! Escape-aware text measurement, wrapping, padding, and truncation.
//!
//! Rendered lines carry ANSI SGR escapes. All widths here are the display
//! width of the text with escapes removed.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::style::RESET;

/// A run of either escape sequence or printable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Escape(&'a str),
    Text(&'a str),
}

/// Split a string into escape sequences and the text between them.
pub fn segments(s: &str) -> Vec<Segment<'_>> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != 0x1b {
            i += 1;
            continue;
        }
        if text_start < i {
            out.push(Segment::Text(&s[text_start..i]));
        }
        let end = escape_end(bytes, i);
        out.push(Segment::Escape(&s[i..end]));
        i = end;
        text_start = end;
    }
    if text_start < bytes.len() {
        out.push(Segment::Text(&s[text_start..]));
    }
    out
}

/// Byte index just past the escape sequence starting at `start`.
fn escape_end(bytes: &[u8], start: usize) -> usize {
    match bytes.get(start + 1) {
        Some(b'[') => {
            let mut j = start + 2;
            while j < bytes.len() {
                if (0x40..=0x7e).contains(&bytes[j]) {
                    return j + 1;
                }
                j += 1;
            }
            bytes.len()
        }
        // OSC runs to BEL or ST.
        Some(b']') => {
            let mut j = start + 2;
            while j < bytes.len() {
                match bytes[j] {
                    0x07 => return j + 1,
                    0x1b if bytes.get(j + 1) == Some(&b'\\') => return j + 2,
                    _ => j += 1,
                }
            }
            bytes.len()
        }
        // Two-byte escape; never split a multi-byte char.
        Some(b) if b.is_ascii() => start + 2,
        _ => start + 1,
    }
}

/// Remove all escape sequences.
pub fn strip_ansi(s: &str) -> String {
    segments(s)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Text(t) => Some(t),
            Segment::Escape(_) => None,
        })
        .collect()
}

/// Display width of `s` with escape sequences excluded.
pub fn visible_width(s: &str) -> usize {
    segments(s)
        .into_iter()
        .map(|seg| match seg {
            Segment::Text(t) => UnicodeWidthStr::width(t),
            Segment::Escape(_) => 0,
        })
        .sum()
}

/// Replace tabs with spaces up to the next multiple of `tab_width` columns.
pub fn expand_tabs(s: &str, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(s.len());
    let mut col = 0;
    for c in s.chars() {
        match c {
            '\t' => {
                let n = tab_width - col % tab_width;
                out.extend(std::iter::repeat_n(' ', n));
                col += n;
            }
            '\n' => {
                out.push(c);
                col = 0;
            }
            _ => {
                out.push(c);
                col += c.width().unwrap_or(0);
            }
        }
    }
    out
}

/// Append spaces until `s` is `width` columns wide.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    let mut out = String::with_capacity(s.len() + pad);
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// The SGR attributes in effect at some point in a styled string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SgrState {
    bold: bool,
    dim: bool,
    italic: bool,
    underline: bool,
    inverse: bool,
    strike: bool,
    fg: Option<String>,
    bg: Option<String>,
}

impl SgrState {
    /// Update the state with every SGR sequence found in `s`.
    pub fn absorb(&mut self, s: &str) {
        for seg in segments(s) {
            if let Segment::Escape(esc) = seg {
                self.apply(esc);
            }
        }
    }

    fn apply(&mut self, esc: &str) {
        let Some(params) = esc.strip_prefix("\x1b[").and_then(|p| p.strip_suffix('m')) else {
            return;
        };
        let codes: Vec<&str> = params.split(';').collect();
        let mut i = 0;
        while i < codes.len() {
            let code: u16 = codes[i].parse().unwrap_or(0);
            match code {
                0 => *self = Self::default(),
                1 => self.bold = true,
                2 => self.dim = true,
                3 => self.italic = true,
                4 => self.underline = true,
                7 => self.inverse = true,
                9 => self.strike = true,
                22 => {
                    self.bold = false;
                    self.dim = false;
                }
                23 => self.italic = false,
                24 => self.underline = false,
                27 => self.inverse = false,
                29 => self.strike = false,
                30..=37 | 90..=97 => self.fg = Some(code.to_string()),
                39 => self.fg = None,
                40..=47 | 100..=107 => self.bg = Some(code.to_string()),
                49 => self.bg = None,
                38 | 48 => {
                    let len = match codes.get(i + 1) {
                        Some(&"2") => 5,
                        Some(&"5") => 3,
                        _ => 1,
                    };
                    let end = (i + len).min(codes.len());
                    let color = codes[i..end].join(";");
                    if code == 38 {
                        self.fg = Some(color);
                    } else {
                        self.bg = Some(color);
                    }
                    i = end;
                    continue;
                }
                _ => {}
            }
            i += 1;
        }
    }

    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }

    /// Escape sequence that re-establishes this state from a reset.
    pub fn replay(&self) -> String {
        let mut codes: Vec<String> = Vec::new();
        for (on, code) in [
            (self.bold, "1"),
            (self.dim, "2"),
            (self.italic, "3"),
            (self.underline, "4"),
            (self.inverse, "7"),
            (self.strike, "9"),
        ] {
            if on {
                codes.push(code.to_string());
            }
        }
        codes.extend(self.fg.iter().cloned());
        codes.extend(self.bg.iter().cloned());
        if codes.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", codes.join(";"))
        }
    }

    /// Finish a line: reset if any style is still open.
    fn close(&self, mut line: String) -> String {
        if self.is_active() {
            line.push_str(RESET);
        }
        line
    }
}

/// Word-wrap styled text to `width` visible columns.
///
/// `\n` forces a break. Other breaks happen only at whitespace; a word wider
/// than `width` is placed on its own line unbroken. Each produced line is
/// self-contained: styles open at a break are reset at the end of the line
/// and re-opened at the start of the next.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut state = SgrState::default();

    for para in text.split('\n') {
        if visible_width(para) <= width {
            let mut line = state.replay();
            line.push_str(para);
            state.absorb(para);
            lines.push(state.close(line));
            continue;
        }

        let mut current = state.replay();
        let mut current_width = 0;
        let mut has_word = false;
        for word in para.split_whitespace() {
            let word_width = visible_width(word);
            if word_width == 0 {
                current.push_str(word);
                state.absorb(word);
                continue;
            }
            if has_word && current_width + 1 + word_width > width {
                lines.push(state.close(current));
                current = state.replay();
                current_width = 0;
                has_word = false;
            }
            if has_word {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            has_word = true;
            state.absorb(word);
        }
        lines.push(state.close(current));
    }

    lines
}

/// Cut styled text to at most `max` visible columns, keeping escapes intact.
pub fn truncate(s: &str, max: usize) -> String {
    if visible_width(s) <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut state = SgrState::default();
    let mut used = 0;
    'outer: for seg in segments(s) {
        match seg {
            Segment::Escape(esc) => {
                out.push_str(esc);
                state.apply(esc);
            }
            Segment::Text(t) => {
                for ch in t.chars() {
                    let w = ch.width().unwrap_or(0);
                    if used + w > max {
                        break 'outer;
                    }
                    out.push(ch);
                    used += w;
                }
            }
        }
    }
    state.close(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style;
    use proptest::prelude::*;

    #[test]
    fn test_strip_ansi_removes_sgr() {
        assert_eq!(strip_ansi("\x1b[1mbold\x1b[22m plain"), "bold plain");
    }

    #[test]
    fn test_strip_ansi_handles_truecolor() {
        assert_eq!(strip_ansi("\x1b[38;2;1;2;3mx\x1b[39m"), "x");
    }

    #[test]
    fn test_visible_width_counts_wide_chars() {
        assert_eq!(visible_width("日本"), 4);
        assert_eq!(visible_width(&style::bold("日本")), 4);
    }

    #[test]
    fn test_osc_sequence_is_one_escape() {
        assert_eq!(strip_ansi("a\x1b]8;;http://x\x07b"), "ab");
        assert_eq!(strip_ansi("a\x1b]2;title\x1b\\b"), "ab");
        assert_eq!(visible_width("a\x1b]52;c;ZXZpbA==\x07b"), 2);
    }

    #[test]
    fn test_expand_tabs_to_next_stop() {
        assert_eq!(expand_tabs("\tx", 4), "    x");
        assert_eq!(expand_tabs("ab\tc", 4), "ab  c");
        assert_eq!(expand_tabs("abcd\te", 4), "abcd    e");
        assert_eq!(expand_tabs("a\tb\n\tc", 4), "a   b\n    c");
        assert_eq!(expand_tabs("日\tx", 4), "日  x");
    }

    #[test]
    fn test_pad_right_ignores_escapes() {
        let padded = pad_right(&style::bold("ab"), 4);
        assert_eq!(visible_width(&padded), 4);
        assert!(padded.ends_with("  "));
    }

    #[test]
    fn test_wrap_short_text_unchanged() {
        assert_eq!(wrap("hello world", 20), vec!["hello world".to_string()]);
    }

    #[test]
    fn test_wrap_breaks_on_whitespace() {
        assert_eq!(
            wrap("the quick brown fox", 10),
            vec!["the quick".to_string(), "brown fox".to_string()]
        );
    }

    #[test]
    fn test_wrap_long_word_on_own_line() {
        assert_eq!(
            wrap("a supercalifragilistic b", 5),
            vec![
                "a".to_string(),
                "supercalifragilistic".to_string(),
                "b".to_string()
            ]
        );
    }

    #[test]
    fn test_wrap_long_first_word_has_no_empty_line_before() {
        let lines = wrap("unbreakable", 3);
        assert_eq!(lines, vec!["unbreakable".to_string()]);
    }

    #[test]
    fn test_wrap_hard_breaks() {
        assert_eq!(wrap("a\nb", 10), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_wrap_carries_style_across_lines() {
        let text = style::bold("aaa bbb");
        let lines = wrap(&text, 4);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(RESET));
        assert!(lines[1].starts_with("\x1b[1m"));
        assert_eq!(strip_ansi(&lines[1]), "bbb");
    }

    #[test]
    fn test_wrap_closed_style_needs_no_reset() {
        let text = format!("{} tail words", style::bold("x"));
        let lines = wrap(&text, 6);
        assert!(lines.iter().all(|l| !l.contains(RESET)));
    }

    #[test]
    fn test_truncate_keeps_width() {
        let s = style::fg(style::Color::Red, "abcdef");
        let cut = truncate(&s, 3);
        assert_eq!(strip_ansi(&cut), "abc");
        assert!(cut.ends_with(RESET));
    }

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_does_not_split_wide_char() {
        assert_eq!(truncate("日本語", 3), "日");
    }

    #[test]
    fn test_sgr_state_replay() {
        let mut state = SgrState::default();
        state.absorb("\x1b[1m\x1b[38;2;1;2;3m");
        assert_eq!(state.replay(), "\x1b[1;38;2;1;2;3m");
        state.absorb("\x1b[22m\x1b[39m");
        assert!(!state.is_active());
    }

    proptest! {
        #[test]
        fn prop_wrap_respects_width(
            words in proptest::collection::vec("[a-z]{1,12}", 0..40),
            width in 10usize..120,
        ) {
            let text = words.join(" ");
            for line in wrap(&text, width) {
                let w = visible_width(&line);
                prop_assert!(
                    w <= width || (!line.contains(' ') && words.contains(&line)),
                    "line {line:?} is {w} wide at width {width}"
                );
            }
        }

        #[test]
        fn prop_wrap_preserves_words(
            words in proptest::collection::vec("[a-z]{1,12}", 1..40),
            width in 10usize..120,
        ) {
            let text = words.join(" ");
            let rejoined: Vec<String> = wrap(&text, width)
                .iter()
                .flat_map(|l| l.split(' ').map(ToString::to_string).collect::<Vec<_>>())
                .collect();
            prop_assert_eq!(rejoined, words);
        }
    }
}
