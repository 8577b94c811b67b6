use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{event, terminal};
use tracing::debug;

use crate::app::input::handle_event;
use crate::app::session::{Suspend, TerminalSession};
use crate::app::{App, Message, Model};
use crate::ui::draw;

impl App {
    /// Run the interactive pager until the user quits.
    ///
    /// The terminal is restored on every exit path, including errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized, or if reading
    /// events or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::enter()
            .context("failed to initialize terminal; glyphmd requires an interactive terminal")?;
        let size = terminal::size().context("failed to query terminal size")?;

        let mut model = Model::new(Vec::new(), size)
            .with_file_path(self.file_path.clone())
            .with_max_width(self.max_width);
        let initial = self.recompile(model.wrap_width());
        self.dispatch(&mut model, &mut session, initial)?;

        let result = self.event_loop(&mut session, &mut model);
        drop(session);
        result
    }

    fn event_loop(&mut self, session: &mut impl Suspend, model: &mut Model) -> Result<()> {
        let mut out = stdout();
        let mut needs_render = true;

        loop {
            if needs_render {
                draw(&mut out, model)?;
                needs_render = false;
            }

            let event = event::read()?;
            if let Some(msg) = handle_event(&event, model) {
                self.handle_message(session, model, msg)?;
                needs_render = true;
            }

            // Coalesce key repeat bursts into a single render.
            while !model.should_quit && event::poll(Duration::ZERO)? {
                if let Some(msg) = handle_event(&event::read()?, model) {
                    self.handle_message(session, model, msg)?;
                    needs_render = true;
                }
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_message(
        &mut self,
        session: &mut impl Suspend,
        model: &mut Model,
        msg: Message,
    ) -> Result<()> {
        debug!(?msg, "message");
        let edit = msg == Message::EditFile;
        self.dispatch(model, session, msg)?;

        // The terminal may have been resized while the editor owned it.
        if edit {
            let (cols, rows) = terminal::size()?;
            let vp = &model.viewport;
            if (cols, rows) != (vp.cols(), vp.rows()) {
                self.dispatch(model, session, Message::Resize(cols, rows))?;
            }
        }
        Ok(())
    }
}
