//! Key input: Map key presses to selector actions.
//!
//! Keys are read through crossterm's event reader. It resolves escape
//! sequences (arrows, Shift-Tab) with a short timeout after the escape
//! byte, so a slow link that delivers a sequence byte by byte is still
//! decoded correctly, and a lone Escape is reported as such.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;

/// What a key press asks the selector to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Open the highlighted reference.
    Edit,
    /// Leave without a selection.
    Quit,
    /// Highlight the next reference.
    Next,
    /// Highlight the previous reference.
    Previous,
    /// Highlight the first reference.
    First,
    /// Highlight the last reference.
    Last,
    /// Not a bound key.
    None,
}

impl Action {
    /// Decode a key press.
    pub fn from_key(key: &KeyEvent) -> Self {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key.code {
            KeyCode::Enter => Self::Edit,

            KeyCode::Char('c' | 'd') if control => Self::Quit,
            KeyCode::Char('n') if control => Self::Next,
            KeyCode::Char('p') if control => Self::Previous,
            KeyCode::Char('a') if control => Self::First,
            KeyCode::Char('e') if control => Self::Last,

            KeyCode::Char('q') if plain => Self::Quit,
            KeyCode::Char('j') if plain => Self::Next,
            KeyCode::Char('k') if plain => Self::Previous,

            KeyCode::Tab | KeyCode::Down | KeyCode::Right => Self::Next,
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => Self::Previous,

            _ => Self::None,
        }
    }
}

/// A source of key presses.
pub trait KeySource {
    /// Block until the next key press. `None` means no more input will
    /// arrive.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Key presses from the controlling terminal.
///
/// crossterm reads from `/dev/tty` when standard input is not a terminal,
/// which is the usual case here since the utility's output may have been
/// piped in.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            match event::read()? {
                // Only process key press events (not release or repeat)
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
                // Resizes, focus changes and paste are not handled
                _ => {}
            }
        }
    }
}
