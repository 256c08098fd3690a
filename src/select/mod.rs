//! Selection: Let the user pick one of the extracted references.
//!
//! The captured output is redrawn in place with the current reference in
//! inverse video. Keys move the highlight; Enter picks it, `q` gives up.
//!
//! - [`keys`]: Key events to [`Action`]s
//! - [`Selector`]: The navigation state machine
//! - [`View`]: Which part of the output is on screen, and how to redraw it
//! - [`run`]: The loop tying them together

pub mod keys;
mod engine;
mod state;
mod view;

pub use engine::{run, SelectConfig};
pub use keys::{Action, KeySource, TerminalKeys};
pub use state::{InitialSelection, Outcome, Selector, Transition};
pub use view::{View, Window};
