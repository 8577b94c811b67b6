//! Ownership of the terminal while the pager runs.
//!
//! [`TerminalSession`] puts the terminal into raw mode on the alternate
//! screen and restores it when dropped, whether the loop ends normally,
//! returns an error, or panics.

use std::io::{self, Write, stdout};
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};

/// Hand the terminal to another program and take it back.
pub trait Suspend {
    /// Restore normal terminal modes so a child process can use them.
    fn suspend(&mut self) -> io::Result<()>;
    /// Re-enter pager modes after the child exits.
    fn resume(&mut self) -> io::Result<()>;
}

/// Raw mode plus alternate screen, restored on drop.
#[derive(Debug)]
pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen, hiding the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal rejects any of the mode changes.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enter_modes()?;
        Ok(Self { active: true })
    }
}

impl Suspend for TerminalSession {
    fn suspend(&mut self) -> io::Result<()> {
        if self.active {
            leave_modes()?;
            self.active = false;
        }
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        if !self.active {
            enter_modes()?;
            self.active = true;
        }
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            let _ = leave_modes();
        }
    }
}

fn enter_modes() -> io::Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
    out.flush()
}

fn leave_modes() -> io::Result<()> {
    let mut out = stdout();
    let screen = execute!(out, Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    screen.and(raw)
}

/// Restore the terminal before the default panic message prints, so the
/// message is readable and the shell is left usable.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = leave_modes();
            previous(info);
        }));
    });
}
