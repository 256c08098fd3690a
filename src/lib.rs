//! # pls
//!
//! Run a command, pick a file reference out of its output, open it in your
//! editor.
//!
//! pls runs a utility (a compiler, a test runner, a linter) and shows its
//! output live. If the utility fails, the output is scanned for things that
//! look like `path:line:column` and the user steps through them with the
//! keyboard; Enter opens the highlighted one in the editor.
//!
//! ## Core Concepts
//!
//! - **Display rows**: The [`InputBuffer`] indexes output by terminal row as
//!   it arrives, counting escape sequences as zero width
//! - **Patterns**: Regular expressions with the path, line and column in
//!   groups 1, 2 and 3, tried in order per line
//! - **In-place redraw**: The selector rewrites the region the output
//!   occupied instead of clearing the screen
//!
//! ## Example
//!
//! ```rust
//! use pls::{scan, InputBuffer, PatternList};
//!
//! let text = b"src/main.rs:10:5: error: expected `;`\n";
//!
//! let mut buffer = InputBuffer::new();
//! buffer.feed(text, 80);
//!
//! let patterns = PatternList::with_defaults().unwrap();
//! let fields = scan(buffer.as_bytes(), &patterns, 100, None);
//! assert_eq!(fields.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod capture;
pub mod config;
pub mod editor;
pub mod error;
pub mod pattern;
pub mod select;
pub mod terminal;

// Re-exports for convenience
pub use buffer::InputBuffer;
pub use config::{Command, Options, UsageError};
pub use error::{Error, Result};
pub use pattern::{scan, ExistingPaths, FieldTable, PatternList, ReferenceRecord, Span};
pub use select::{InitialSelection, Outcome, SelectConfig};
pub use terminal::{OutputBuffer, TerminalGeometry, TerminalSession};
