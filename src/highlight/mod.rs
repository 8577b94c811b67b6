//! Syntax highlighting for code blocks.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions and
//! emits 24-bit ANSI foreground escapes, one string per source line. The
//! bundled syntaxes are extended with an MLIR grammar.

use std::path::Path;
use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxDefinition, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;
use tracing::warn;

use crate::render::style::{self, Rgb};

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("syntax highlighting failed: {0}")]
    Syntect(String),
}

/// Turns code into pre-styled terminal lines.
pub trait Highlighter {
    /// Highlight `code` for the given language hint.
    ///
    /// Returns one styled string per source line. Unknown or absent
    /// languages yield the lines unstyled.
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<Vec<String>, HighlightError>;
}

/// Terminal background brightness, used to pick themes and adjust colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    #[default]
    Dark,
    Light,
}

impl BackgroundMode {
    /// Guess the background from the `COLORFGBG` environment variable.
    pub fn detect() -> Self {
        background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }
}

/// [`Highlighter`] backed by syntect's bundled syntaxes and themes.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    theme: Theme,
    mode: BackgroundMode,
}

impl SyntectHighlighter {
    pub fn new(mode: BackgroundMode) -> Self {
        Self {
            theme: theme_for(mode),
            mode,
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(BackgroundMode::default())
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<Vec<String>, HighlightError> {
        let syntax_set = syntax_set();
        let syntax = language
            .and_then(|lang| syntax_set.find_syntax_by_token(lang))
            .or_else(|| language.and_then(|lang| syntax_set.find_syntax_by_name(lang)));

        let Some(syntax) = syntax else {
            return Ok(code.lines().map(ToString::to_string).collect());
        };

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter
                .highlight_line(line, syntax_set)
                .map_err(|e| HighlightError::Syntect(e.to_string()))?;
            let mut out = String::new();
            for (style, text) in ranges {
                let text = text.trim_end_matches(['\n', '\r']);
                if text.is_empty() {
                    continue;
                }
                let fg = Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                out.push_str(&style::fg_rgb(adjust_fg_for_background(fg, self.mode), text));
            }
            lines.push(out);
        }
        Ok(lines)
    }
}

/// Syntax name for a source file the highlighter understands.
///
/// Markdown and plain text return `None` so they are rendered as documents.
pub fn language_for_file(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    let syntax = syntax_set().find_syntax_by_extension(ext)?;
    match syntax.name.as_str() {
        "Markdown" | "MultiMarkdown" | "Plain Text" => None,
        name => Some(name.to_string()),
    }
}

const MLIR_SYNTAX: &str = include_str!("mlir.sublime-syntax");

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(build_syntax_set)
}

fn build_syntax_set() -> SyntaxSet {
    let defaults = SyntaxSet::load_defaults_newlines();
    match SyntaxDefinition::load_from_str(MLIR_SYNTAX, true, None) {
        Ok(mlir) => {
            let mut builder = defaults.into_builder();
            builder.add(mlir);
            builder.build()
        }
        Err(err) => {
            warn!(error = %err, "failed to load MLIR syntax, using bundled syntaxes only");
            defaults
        }
    }
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn theme_for(mode: BackgroundMode) -> Theme {
    let theme_set = theme_set();
    let preferred = match mode {
        BackgroundMode::Dark => [
            "Monokai Extended",
            "Monokai Extended Bright",
            "Dracula",
            "Solarized (dark)",
            "base16-ocean.dark",
        ]
        .as_slice(),
        BackgroundMode::Light => [
            "InspiredGitHub",
            "Solarized (light)",
            "base16-ocean.light",
        ]
        .as_slice(),
    };

    for name in preferred {
        if let Some(theme) = theme_set.themes.get(*name) {
            return theme.clone();
        }
    }

    theme_set
        .themes
        .values()
        .next()
        .cloned()
        .unwrap_or_default()
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

fn luma(color: Rgb) -> f32 {
    (0.2126 * f32::from(color.0)) + (0.7152 * f32::from(color.1)) + (0.0722 * f32::from(color.2))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn adjust_fg_for_background(color: Rgb, mode: BackgroundMode) -> Rgb {
    match mode {
        BackgroundMode::Dark => color,
        BackgroundMode::Light => {
            if luma(color) < 155.0 {
                return color;
            }
            let darken = |c: u8| (f32::from(c) * 0.42).round() as u8;
            Rgb(darken(color.0), darken(color.1), darken(color.2))
        }
    }
}
