//! Buffer module: Captured output and its display-line index.
//!
//! This module contains:
//! - [`InputBuffer`]: Append-only byte store that tracks where each
//!   terminal row starts as data streams in
//! - [`escape`]: Lexer for ANSI CSI sequences, which take no width

pub mod escape;
mod input;

pub use input::{next_line, InputBuffer};
