//! Selection loop: Draw, read a key, repeat until the user decides.

use super::keys::{Action, KeySource};
use super::state::{InitialSelection, Outcome, Selector, Transition};
use super::view::View;
use crate::buffer::InputBuffer;
use crate::pattern::FieldTable;
use crate::terminal::OutputBuffer;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Configuration for [`run`].
#[derive(Debug, Clone, Copy)]
pub struct SelectConfig {
    /// Which reference to highlight first.
    pub initial: InitialSelection,
    /// Rows available for drawing.
    pub view_height: usize,
    /// How far below the top of the output the cursor sits when selection
    /// starts.
    pub cursor_row: usize,
}

/// Run the selector until the user picks a reference or quits.
///
/// Each frame is assembled in an [`OutputBuffer`] and written to `out` in
/// one call. Keys that are not bound leave the screen untouched. Running out
/// of key input counts as quitting.
pub fn run<K, W>(
    buffer: &InputBuffer,
    fields: &FieldTable,
    config: SelectConfig,
    keys: &mut K,
    out: &mut W,
) -> io::Result<Outcome>
where
    K: KeySource + ?Sized,
    W: Write + ?Sized,
{
    if fields.is_empty() {
        return Ok(Outcome::Quit);
    }

    let mut selector = Selector::new(fields.len(), config.initial);
    let mut view = View::new(config.view_height, config.cursor_row);
    let mut frame = OutputBuffer::new();

    loop {
        let record = fields.records()[selector.index()];

        frame.clear();
        view.draw(buffer, record.matched, &mut frame);
        frame.flush_to(out)?;
        trace!(index = selector.index(), bytes = frame.len(), "frame drawn");

        loop {
            let Some(key) = keys.next_key()? else {
                debug!("key input closed");
                return Ok(Outcome::Quit);
            };

            match selector.apply(Action::from_key(&key)) {
                Transition::Moved => break,
                Transition::Unchanged => {}
                Transition::Done(outcome) => {
                    debug!(?outcome, "selection finished");
                    return Ok(outcome);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{scan, PatternList};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<KeyEvent>);

    impl KeySource for Scripted {
        fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
            Ok(self.0.pop_front())
        }
    }

    fn keys(codes: &[KeyCode]) -> Scripted {
        Scripted(
            codes
                .iter()
                .map(|&code| KeyEvent::new(code, KeyModifiers::NONE))
                .collect(),
        )
    }

    fn setup(text: &[u8]) -> (InputBuffer, FieldTable) {
        let mut buffer = InputBuffer::new();
        buffer.feed(text, 80);
        let fields = scan(text, &PatternList::with_defaults().unwrap(), 100, None);
        (buffer, fields)
    }

    fn config(initial: InitialSelection) -> SelectConfig {
        SelectConfig {
            initial,
            view_height: 23,
            cursor_row: 0,
        }
    }

    #[test]
    fn test_edit_after_navigation() {
        let (buffer, fields) = setup(b"a.rs:1\nb.rs:2\nc.rs:3\n");
        let mut input = keys(&[KeyCode::Tab, KeyCode::Down, KeyCode::Up, KeyCode::Enter]);
        let outcome = run(&buffer, &fields, config(InitialSelection::First), &mut input, &mut io::sink()).unwrap();
        assert_eq!(outcome, Outcome::Edit(1));
    }

    #[test]
    fn test_initial_last_wraps_forward() {
        let (buffer, fields) = setup(b"a.rs:1\nb.rs:2\nc.rs:3\n");
        let mut input = keys(&[KeyCode::Char('j'), KeyCode::Enter]);
        let outcome = run(&buffer, &fields, config(InitialSelection::Last), &mut input, &mut io::sink()).unwrap();
        assert_eq!(outcome, Outcome::Edit(0));
    }

    #[test]
    fn test_quit_and_exhausted_input() {
        let (buffer, fields) = setup(b"a.rs:1\n");
        let mut input = keys(&[KeyCode::Char('q'), KeyCode::Enter]);
        let outcome = run(&buffer, &fields, config(InitialSelection::First), &mut input, &mut io::sink()).unwrap();
        assert_eq!(outcome, Outcome::Quit);

        let mut input = keys(&[]);
        let outcome = run(&buffer, &fields, config(InitialSelection::First), &mut input, &mut io::sink()).unwrap();
        assert_eq!(outcome, Outcome::Quit);
    }

    #[test]
    fn test_unbound_key_draws_nothing() {
        let (buffer, fields) = setup(b"a.rs:1\nb.rs:2\n");

        let mut plain = Vec::new();
        run(&buffer, &fields, config(InitialSelection::First), &mut keys(&[KeyCode::Enter]), &mut plain).unwrap();

        let mut with_noise = Vec::new();
        run(
            &buffer,
            &fields,
            config(InitialSelection::First),
            &mut keys(&[KeyCode::Char('x'), KeyCode::Esc, KeyCode::Enter]),
            &mut with_noise,
        )
        .unwrap();

        assert_eq!(plain, with_noise);
    }

    #[test]
    fn test_no_fields() {
        let (buffer, fields) = setup(b"nothing to see\n");
        let mut out = Vec::new();
        let outcome = run(&buffer, &fields, config(InitialSelection::First), &mut keys(&[]), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Quit);
        assert!(out.is_empty());
    }
}
