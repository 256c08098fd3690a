//! Terminal module: Everything that talks to the real terminal.
//!
//! - [`TerminalSession`]: Raw mode and alternate screen, restored on drop
//! - [`TerminalGeometry`]: Rows and columns, sampled once
//! - [`OutputBuffer`]: Frame assembly, flushed in one write

mod output;
mod session;

pub use output::OutputBuffer;
pub use session::{stdout_is_terminal, SessionConfig, TerminalGeometry, TerminalSession};
