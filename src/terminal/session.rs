//! Terminal session: Raw mode for the duration of the selection.
//!
//! The session is a guard. Creating it switches the terminal into raw mode
//! (and optionally the alternate screen) and hides the cursor; dropping it
//! undoes all of that, on every exit path.

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Terminal size, sampled once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalGeometry {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub cols: u16,
}

impl TerminalGeometry {
    /// The size assumed when the terminal cannot be asked.
    pub const FALLBACK: Self = Self { rows: 24, cols: 80 };

    /// Ask the terminal for its size.
    pub fn query() -> Self {
        match terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => Self { rows, cols },
            Ok(_) => Self::FALLBACK,
            Err(e) => {
                warn!(error = %e, "could not read terminal size, assuming 80x24");
                Self::FALLBACK
            }
        }
    }

    /// Width in columns, for display-row indexing.
    pub const fn width(self) -> usize {
        self.cols as usize
    }

    /// Rows available for drawing captured output.
    ///
    /// The bottom row is kept free for the cursor so that a frame ending in a
    /// newline never scrolls the screen.
    pub const fn view_height(self) -> usize {
        if self.rows > 1 {
            self.rows as usize - 1
        } else {
            1
        }
    }
}

/// Check whether standard output is a terminal.
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_tty()
}

/// Configuration for a [`TerminalSession`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
}

/// Raw-mode guard.
pub struct TerminalSession {
    config: SessionConfig,
}

impl TerminalSession {
    /// Enter raw mode, and the alternate screen if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails. Whatever was already
    /// switched on is switched off again.
    pub fn enter(config: SessionConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        // From here on, Drop restores the terminal even if setup fails.
        let session = Self { config };

        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen, cursor::MoveTo(0, 0))?;
        }
        execute!(stdout, cursor::Hide)?;

        debug!(alternate_screen = config.alternate_screen, "terminal session started");
        Ok(session)
    }

    /// Whether the session is drawing on the alternate screen.
    pub const fn alternate_screen(&self) -> bool {
        self.config.alternate_screen
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Restore terminal state
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x1b[0m");
        let _ = execute!(stdout, cursor::Show);
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        debug!("terminal session ended");
    }
}
