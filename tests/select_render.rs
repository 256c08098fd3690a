//! Selection frames interpreted by a virtual terminal.
//!
//! The selector writes raw escape sequences; feeding them to `vt100` shows
//! what the user would actually see after each session.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pls::select::{self, KeySource, Outcome, SelectConfig};
use pls::{scan, FieldTable, InitialSelection, InputBuffer, PatternList};

const ROWS: u16 = 10;
const COLS: u16 = 40;

struct Scripted(VecDeque<KeyEvent>);

impl Scripted {
    fn new(codes: &[KeyCode]) -> Self {
        Self(
            codes
                .iter()
                .map(|&code| KeyEvent::new(code, KeyModifiers::NONE))
                .collect(),
        )
    }
}

impl KeySource for Scripted {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.0.pop_front())
    }
}

/// The captured output as a cooked-mode terminal echoes it.
fn echo(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for &b in text {
        if b == b'\n' {
            out.push(b'\r');
        }
        out.push(b);
    }
    out
}

struct Session {
    screen: vt100::Parser,
    outcome: Outcome,
}

/// Echo `text`, then run a selection over it with `keys`.
fn select_over(text: &[u8], initial: InitialSelection, keys: &[KeyCode]) -> Session {
    let mut buffer = InputBuffer::new();
    buffer.feed(text, usize::from(COLS));
    let patterns = PatternList::with_defaults().unwrap();
    let fields: FieldTable = scan(buffer.as_bytes(), &patterns, 100, None);

    let mut screen = vt100::Parser::new(ROWS, COLS, 0);
    screen.process(&echo(text));

    let view_height = usize::from(ROWS) - 1;
    let config = SelectConfig {
        initial,
        view_height,
        cursor_row: buffer.line_count().min(view_height),
    };

    let mut frames = Vec::new();
    let outcome = select::run(&buffer, &fields, config, &mut Scripted::new(keys), &mut frames).unwrap();
    screen.process(&frames);

    Session { screen, outcome }
}

fn row_text(screen: &vt100::Screen, row: usize) -> String {
    screen.rows(0, COLS).nth(row).unwrap_or_default()
}

fn inverse_columns(screen: &vt100::Screen, row: u16) -> Vec<u16> {
    (0..COLS)
        .filter(|&col| screen.cell(row, col).is_some_and(vt100::Cell::inverse))
        .collect()
}

const COMPILER_OUTPUT: &[u8] = b"build started\nsrc/a.rs:3:1: error\nnote\nsrc/b.rs:7: warning\n";

#[test]
fn test_first_reference_highlighted() {
    let session = select_over(COMPILER_OUTPUT, InitialSelection::First, &[KeyCode::Char('q')]);
    let screen = session.screen.screen();

    assert_eq!(session.outcome, Outcome::Quit);
    assert_eq!(inverse_columns(screen, 1), (0..12).collect::<Vec<_>>());
    assert!(inverse_columns(screen, 3).is_empty());
}

#[test]
fn test_redraw_in_place_after_tab() {
    let session = select_over(COMPILER_OUTPUT, InitialSelection::First, &[KeyCode::Tab, KeyCode::Enter]);
    let screen = session.screen.screen();

    assert_eq!(session.outcome, Outcome::Edit(1));

    // The frame replaced the echoed output instead of being drawn below it.
    assert_eq!(row_text(screen, 0), "build started");
    assert_eq!(row_text(screen, 3), "src/b.rs:7: warning");
    for row in 4..usize::from(ROWS) {
        assert_eq!(row_text(screen, row), "", "row {row}");
    }

    assert!(inverse_columns(screen, 1).is_empty());
    assert_eq!(inverse_columns(screen, 3), (0..10).collect::<Vec<_>>());
    assert_eq!(screen.cursor_position(), (4, 0));
}

#[test]
fn test_long_output_scrolls_to_selection() {
    let text: String = (0..30).map(|i| format!("f{i:02}.rs:{i}\n")).collect();
    let session = select_over(text.as_bytes(), InitialSelection::Last, &[KeyCode::Enter]);
    let screen = session.screen.screen();

    assert_eq!(session.outcome, Outcome::Edit(29));

    // Nine rows of output, ending with the last reference, cursor on the
    // spare bottom row.
    assert_eq!(row_text(screen, 0), "f21.rs:21");
    assert_eq!(row_text(screen, 8), "f29.rs:29");
    assert_eq!(inverse_columns(screen, 8), (0..9).collect::<Vec<_>>());
    assert_eq!(screen.cursor_position(), (9, 0));
}

#[test]
fn test_jump_to_first_moves_window() {
    let text: String = (0..30).map(|i| format!("f{i:02}.rs:{i}\n")).collect();
    let session = select_over(
        text.as_bytes(),
        InitialSelection::Last,
        &[KeyCode::Char('x'), KeyCode::Tab, KeyCode::Enter],
    );
    let screen = session.screen.screen();

    // Tab from the last reference wraps to the first.
    assert_eq!(session.outcome, Outcome::Edit(0));
    assert_eq!(row_text(screen, 0), "f00.rs:0");
    assert_eq!(inverse_columns(screen, 0), (0..8).collect::<Vec<_>>());
}

#[test]
fn test_coloured_output_keeps_rows() {
    let text = b"\x1b[1msrc/c.rs:12:5:\x1b[0m \x1b[31merror\x1b[0m: bad\nok\n";
    let session = select_over(text, InitialSelection::First, &[KeyCode::Enter]);
    let screen = session.screen.screen();

    assert_eq!(session.outcome, Outcome::Edit(0));
    assert_eq!(row_text(screen, 0), "src/c.rs:12:5: error: bad");
    assert_eq!(row_text(screen, 1), "ok");
    assert_eq!(screen.cursor_position(), (2, 0));
}
