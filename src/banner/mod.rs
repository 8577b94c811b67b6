//! ASCII-art rendering for top-level headings.

use std::sync::OnceLock;

use figlet_rs::FIGfont;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BannerError {
    #[error("failed to load figlet font: {0}")]
    Font(String),
    #[error("text cannot be rendered with the figlet font")]
    Unrenderable,
}

/// Turns a heading's text into multi-line glyph art.
pub trait Banner {
    fn render(&self, text: &str) -> Result<Vec<String>, BannerError>;
}

/// [`Banner`] using figlet's built-in "Standard" font.
#[derive(Debug, Default, Clone, Copy)]
pub struct FigletBanner;

fn standard_font() -> Result<&'static FIGfont, BannerError> {
    static FONT: OnceLock<Result<FIGfont, String>> = OnceLock::new();
    FONT.get_or_init(FIGfont::standard)
        .as_ref()
        .map_err(|e| BannerError::Font(e.clone()))
}

impl Banner for FigletBanner {
    fn render(&self, text: &str) -> Result<Vec<String>, BannerError> {
        let font = standard_font()?;
        let missing_glyph = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .any(|c| !font.fonts.contains_key(&u32::from(c)));
        if missing_glyph {
            return Err(BannerError::Unrenderable);
        }
        let figure = font.convert(text).ok_or(BannerError::Unrenderable)?;
        let mut lines: Vec<String> = figure
            .to_string()
            .lines()
            .map(|l| l.trim_end().to_string())
            .collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(BannerError::Unrenderable);
        }
        Ok(lines)
    }
}
