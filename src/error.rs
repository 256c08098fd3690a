//! Error types shared across the crate.
//!
//! Everything in here is fatal: the binary prints the message and exits.
//! Recoverable conditions (a failing output stream, a match without a path
//! capture) are logged where they happen and never become an [`Error`].

use std::io;
use thiserror::Error;

/// Fatal errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Standard output is not attached to a terminal.
    #[error("output is not a terminal")]
    NotATerminal,

    /// The pattern list ended up empty.
    #[error("no patterns loaded!")]
    NoPatterns,

    /// A pattern failed to compile.
    #[error("could not compile '{pattern}': {source}")]
    PatternCompile {
        /// The pattern text as written.
        pattern: String,
        /// The regex error.
        #[source]
        source: regex::Error,
    },

    /// The utility could not be started.
    #[error("could not run '{program}': {source}")]
    Spawn {
        /// The program name from argv.
        program: String,
        /// The underlying spawn error.
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure during setup.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
