//! Glyphmd - A terminal markdown pager.
//!
//! # Usage
//!
//! ```bash
//! glyphmd README.md
//! glyphmd --width 100 --theme light notes.md
//! cat CHANGELOG.md | glyphmd
//! glyphmd --plain README.md > out.txt
//! ```

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use glyphmd::app::App;
use glyphmd::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use glyphmd::document::{load_file, read_stdin};
use glyphmd::render::Renderer;
use glyphmd::ui::write_plain;

/// Width used for plain output when the terminal size is unknown.
const FALLBACK_WIDTH: u16 = 80;

/// A terminal markdown pager
#[derive(Parser, Debug)]
#[command(name = "glyphmd", version, about, long_about = None)]
struct Cli {
    /// Markdown file to view; `-` or omitted reads standard input
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Syntax highlight theme background
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Maximum wrap width in columns
    #[arg(long, value_name = "COLS", value_parser = clap::value_parser!(u16).range(1..))]
    width: Option<u16>,

    /// Print the rendered document instead of paging it
    #[arg(long)]
    plain: bool,

    /// Editor command for `E`/`v` (overrides $VISUAL and $EDITOR)
    #[arg(long, value_name = "CMD")]
    editor: Option<String>,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            plain: self.plain,
            theme: self.theme,
            width: self.width,
            editor: self.editor.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Load the document: a named file, or standard input for `-` or no path.
fn load_input(file: Option<&Path>) -> Result<(String, Option<PathBuf>)> {
    match file {
        Some(path) if path != Path::new("-") => {
            let source = load_file(path)?;
            Ok((source, Some(path.to_path_buf())))
        }
        _ if io::stdin().is_terminal() => {
            bail!("no input: pass a markdown file or pipe one on standard input")
        }
        _ => Ok((read_stdin()?, None)),
    }
}

fn print_plain(renderer: &Renderer, source: &str, max_width: Option<u16>) -> Result<()> {
    let cols = crossterm::terminal::size().map_or(FALLBACK_WIDTH, |(cols, _)| cols.max(1));
    let width = max_width.map_or(cols, |max| cols.min(max));
    let lines = renderer.compile(source, usize::from(width));
    let strip_styles = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());

    match write_plain(&mut io::stdout().lock(), &lines, strip_styles) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("Failed to write output"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_file = effective
        .log_file
        .clone()
        .or_else(|| std::env::var_os("GLYPHMD_LOG").map(PathBuf::from));
    init_logging(log_file.as_deref())?;

    let (source, file_path) = load_input(cli.file.as_deref())?;
    let renderer = Renderer::new(effective.theme.unwrap_or(ThemeMode::Auto).background());

    if effective.plain || !io::stdout().is_terminal() {
        return print_plain(&renderer, &source, effective.width);
    }

    let mut app = App::new(source, renderer)
        .with_file_path(file_path)
        .with_editor(effective.editor)
        .with_max_width(effective.width);

    app.run().context("Application error")
}
