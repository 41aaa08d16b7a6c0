/// Raw mode and alternate screen, switched on for one run and always undone
use crossterm::{cursor, execute, terminal};
use log::warn;
use std::io::{self, stdout};

/// The terminal mode switches a run needs
pub trait TerminalModes {
    fn enable_raw_mode(&mut self) -> io::Result<()>;
    fn disable_raw_mode(&mut self) -> io::Result<()>;
    fn enter_screen(&mut self) -> io::Result<()>;
    fn leave_screen(&mut self) -> io::Result<()>;
}

/// Modes of the process's real terminal on stdout
pub struct CrosstermModes;

impl TerminalModes for CrosstermModes {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    fn enter_screen(&mut self) -> io::Result<()> {
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )
    }

    fn leave_screen(&mut self) -> io::Result<()> {
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)
    }
}

/// Undoes every mode it switched on, at the latest when dropped
pub struct TerminalGuard<T: TerminalModes> {
    modes: T,
    raw: bool,
    screen: bool,
}

impl<T: TerminalModes> TerminalGuard<T> {
    /// Enable raw mode, then the alternate screen. A failure part way
    /// through drops the guard, which undoes what already succeeded.
    pub fn enter(modes: T) -> io::Result<Self> {
        let mut guard = Self {
            modes,
            raw: false,
            screen: false,
        };
        guard.modes.enable_raw_mode()?;
        guard.raw = true;
        guard.modes.enter_screen()?;
        guard.screen = true;
        Ok(guard)
    }

    /// Leave the screen and disable raw mode. Both are attempted even if the
    /// first fails; the first error is returned.
    pub fn restore(&mut self) -> io::Result<()> {
        let screen = if std::mem::take(&mut self.screen) {
            self.modes.leave_screen()
        } else {
            Ok(())
        };
        let raw = if std::mem::take(&mut self.raw) {
            self.modes.disable_raw_mode()
        } else {
            Ok(())
        };
        screen.and(raw)
    }
}

impl<T: TerminalModes> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}
