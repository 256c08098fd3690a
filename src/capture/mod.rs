//! Capture: Collect a utility's output into an [`InputBuffer`] while
//! echoing it live.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   CaptureEvent   ┌──────────────────┐   feed()   ┌─────────────┐
//! │ stdout reader │ ───────────────▶ │                  │ ─────────▶ │ InputBuffer │
//! └───────────────┘                  │  Select over the │            └─────────────┘
//! ┌───────────────┐   CaptureEvent   │  open streams    │   echo     ┌─────────────┐
//! │ stderr reader │ ───────────────▶ │                  │ ─────────▶ │  terminal   │
//! └───────────────┘                  └──────────────────┘            └─────────────┘
//! ```
//!
//! The readers only move bytes. The buffer is owned and written by the
//! calling thread alone, which blocks in the select until a stream has data
//! or reaches end-of-file.
//!
//! [`InputBuffer`]: crate::buffer::InputBuffer

mod messages;
mod multiplexer;
mod reader;

pub use messages::{CaptureEvent, StreamId, Streams};
pub use multiplexer::{multiplex, read_to_buffer, run_command};
pub use reader::StreamReader;

/// Bytes requested per read.
pub const CHUNK_SIZE: usize = 8192;
