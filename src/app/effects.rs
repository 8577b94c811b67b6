use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::{debug, info, warn};

use crate::app::session::Suspend;
use crate::app::{App, Message, Model, update};
use crate::document::reload_file;

/// Editor used when neither the flag nor the environment names one.
pub const DEFAULT_EDITOR: &str = "vim";

impl App {
    /// Apply a message and run whatever side effect it leaves behind.
    ///
    /// Effects report back through [`Message::Recompiled`], which is fed
    /// through [`update`] like any other message.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be handed to or reclaimed
    /// from the editor.
    pub(super) fn dispatch(
        &mut self,
        model: &mut Model,
        session: &mut impl Suspend,
        msg: Message,
    ) -> io::Result<()> {
        let edit = msg == Message::EditFile;
        *model = update(std::mem::take(model), msg);

        let follow_up = if edit {
            self.edit_and_reload(model, session)?
        } else if model.needs_recompile() {
            Some(self.recompile(model.wrap_width()))
        } else {
            None
        };
        if let Some(msg) = follow_up {
            *model = update(std::mem::take(model), msg);
        }
        Ok(())
    }

    /// Compile the current source at `width`.
    pub(super) fn recompile(&self, width: usize) -> Message {
        debug!(width, "recompiling");
        Message::Recompiled {
            lines: self.renderer.compile(&self.source, width),
            width,
        }
    }

    /// Suspend the pager, run the editor on the backing file, then reload it.
    ///
    /// A failed launch or failing exit status is logged and the file is
    /// reloaded anyway. A failed reload keeps the current lines.
    fn edit_and_reload(
        &mut self,
        model: &Model,
        session: &mut impl Suspend,
    ) -> io::Result<Option<Message>> {
        let Some(path) = model.file_path().map(Path::to_path_buf) else {
            return Ok(None);
        };
        let editor = resolve_editor(
            self.editor.as_deref(),
            std::env::var("VISUAL").ok().as_deref(),
            std::env::var("EDITOR").ok().as_deref(),
        );

        session.suspend()?;
        info!(editor = %editor, path = %path.display(), "opening editor");
        match run_editor(&editor, &path) {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(editor = %editor, %status, "editor exited with failure"),
            Err(err) => warn!(editor = %editor, error = %err, "failed to launch editor"),
        }
        // Reload while suspended: warnings must not land on the pager screen.
        let reloaded = match reload_file(&path) {
            Ok(source) => {
                info!(path = %path.display(), "reloaded after edit");
                Some(source)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "reload failed, keeping current document"
                );
                None
            }
        };
        session.resume()?;

        Ok(reloaded.map(|source| {
            self.source = source;
            self.recompile(model.wrap_width())
        }))
    }
}

/// Pick the editor command: explicit setting, then `$VISUAL`, then
/// `$EDITOR`, then [`DEFAULT_EDITOR`]. Blank values count as unset.
pub fn resolve_editor(
    configured: Option<&str>,
    visual: Option<&str>,
    editor: Option<&str>,
) -> String {
    [configured, visual, editor]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|cmd| !cmd.is_empty())
        .unwrap_or(DEFAULT_EDITOR)
        .to_string()
}

/// Build the editor invocation: the command split on whitespace, with the
/// file path appended as the last argument.
pub fn editor_command(editor: &str, path: &Path) -> Option<Command> {
    let mut parts = editor.split_whitespace();
    let mut command = Command::new(parts.next()?);
    command.args(parts).arg(path);
    Some(command)
}

/// Run the editor in the foreground with the terminal's stdio.
fn run_editor(editor: &str, path: &Path) -> io::Result<ExitStatus> {
    editor_command(editor, path)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"))?
        .status()
}
