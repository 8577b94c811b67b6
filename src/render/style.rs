//! ANSI styling primitives.
//!
//! Each function wraps text in an SGR open/close pair. Nested application is
//! safe: any close code already inside the text is followed by a re-open, so
//! an inner style ending does not cancel an outer one. Empty input returns an
//! empty string.

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Full SGR reset.
pub const RESET: &str = "\x1b[0m";

/// Inline code colors.
pub const CODE_BG: Rgb = Rgb(0x3c, 0x3c, 0x3c);
pub const CODE_FG: Rgb = Rgb(0xe0, 0xe0, 0xe0);

/// Named 8-color palette entries used by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
}

impl Color {
    const fn code(self) -> u8 {
        match self {
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::Gray => 90,
        }
    }
}

fn wrap(text: &str, open: &str, close: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(text.len() + open.len() + close.len());
    out.push_str(open);
    if text.contains(close) {
        out.push_str(&text.replace(close, &format!("{close}{open}")));
    } else {
        out.push_str(text);
    }
    out.push_str(close);
    out
}

pub fn bold(text: &str) -> String {
    wrap(text, "\x1b[1m", "\x1b[22m")
}

pub fn dim(text: &str) -> String {
    wrap(text, "\x1b[2m", "\x1b[22m")
}

pub fn italic(text: &str) -> String {
    wrap(text, "\x1b[3m", "\x1b[23m")
}

pub fn underline(text: &str) -> String {
    wrap(text, "\x1b[4m", "\x1b[24m")
}

pub fn inverse(text: &str) -> String {
    wrap(text, "\x1b[7m", "\x1b[27m")
}

pub fn strikethrough(text: &str) -> String {
    wrap(text, "\x1b[9m", "\x1b[29m")
}

pub fn fg(color: Color, text: &str) -> String {
    wrap(text, &format!("\x1b[{}m", color.code()), "\x1b[39m")
}

pub fn fg_rgb(color: Rgb, text: &str) -> String {
    let Rgb(r, g, b) = color;
    wrap(text, &format!("\x1b[38;2;{r};{g};{b}m"), "\x1b[39m")
}

pub fn bg_rgb(color: Rgb, text: &str) -> String {
    let Rgb(r, g, b) = color;
    wrap(text, &format!("\x1b[48;2;{r};{g};{b}m"), "\x1b[49m")
}
