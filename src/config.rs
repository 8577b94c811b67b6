//! Persistent default flags.
//!
//! Defaults live in a plain text file holding one command-line flag per
//! line, e.g. `--theme light` or `--editor code --wait`. Blank lines and
//! lines starting with `#` are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::highlight::BackgroundMode;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// Background mode for highlighting; `Auto` inspects the environment.
    pub fn background(self) -> BackgroundMode {
        match self {
            Self::Auto => BackgroundMode::detect(),
            Self::Light => BackgroundMode::Light,
            Self::Dark => BackgroundMode::Dark,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub plain: bool,
    pub theme: Option<ThemeMode>,
    pub width: Option<u16>,
    pub editor: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            plain: self.plain || other.plain,
            theme: other.theme.or(self.theme),
            width: other.width.or(self.width),
            editor: other.editor.clone().or_else(|| self.editor.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("glyphmd").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("glyphmd")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("glyphmd").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("glyphmd")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".glyphmdrc")
}

/// Load flags from `path`. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((flag, value)) => vec![flag.to_string(), value.trim().to_string()],
            None => vec![line.to_string()],
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# glyphmd defaults (saved with --save)".to_string());
    if flags.plain {
        lines.push("--plain".to_string());
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(width) = flags.width {
        lines.push(format!("--width {width}"));
    }
    if let Some(editor) = &flags.editor {
        lines.push(format!("--editor {editor}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Delete the config file at `path` if there is one.
///
/// # Errors
///
/// Returns an error if an existing file cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list; everything else is skipped.
///
/// Values may follow as the next token or be attached with `=`. Invalid
/// values leave the flag unset.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        if name == "--plain" {
            flags.plain = true;
            i += 1;
            continue;
        }
        if !matches!(name, "--theme" | "--width" | "--editor" | "--log-file") {
            i += 1;
            continue;
        }
        let value = match inline_value {
            Some(value) => Some(value),
            None => {
                i += 1;
                tokens.get(i).map(String::as_str)
            }
        };
        if let Some(value) = value {
            match name {
                "--theme" => flags.theme = parse_theme(value),
                "--width" => flags.width = value.parse().ok().filter(|w| *w > 0),
                "--editor" => {
                    flags.editor = Some(value.to_string()).filter(|e| !e.trim().is_empty());
                }
                _ => flags.log_file = Some(PathBuf::from(value)),
            }
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "glyphmd",
            "--plain",
            "--theme",
            "dark",
            "--width=72",
            "--editor",
            "code --wait",
            "--log-file=glyphmd.log",
            "README.md",
        ]);
        let flags = parse_flag_tokens(&args);
        assert!(flags.plain);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.width, Some(72));
        assert_eq!(flags.editor.as_deref(), Some("code --wait"));
        assert_eq!(flags.log_file, Some(PathBuf::from("glyphmd.log")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_invalid_values() {
        let flags = parse_flag_tokens(&tokens(&["--theme", "sepia", "--width", "0"]));
        assert_eq!(flags.theme, None);
        assert_eq!(flags.width, None);
    }

    #[test]
    fn test_parse_flag_tokens_missing_value() {
        let flags = parse_flag_tokens(&tokens(&["--plain", "--width"]));
        assert!(flags.plain);
        assert_eq!(flags.width, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            plain: true,
            theme: Some(ThemeMode::Light),
            editor: Some("nano".to_string()),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            width: Some(80),
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.plain);
        assert_eq!(merged.width, Some(80));
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.editor.as_deref(), Some("nano"));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config");
        let flags = ConfigFlags {
            plain: true,
            theme: Some(ThemeMode::Dark),
            width: Some(100),
            editor: Some("code --wait".to_string()),
            log_file: Some(PathBuf::from("glyphmd.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }

    #[test]
    fn test_load_skips_comments_and_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, "# defaults\n\n--theme light\n   \n--plain\n").unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded.theme, Some(ThemeMode::Light));
        assert!(loaded.plain);
    }

    #[test]
    fn test_theme_background() {
        assert_eq!(ThemeMode::Light.background(), BackgroundMode::Light);
        assert_eq!(ThemeMode::Dark.background(), BackgroundMode::Dark);
    }
}
