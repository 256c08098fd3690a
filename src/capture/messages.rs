//! Message types between the stream readers and the capture loop.

use bitflags::bitflags;

/// One of the utility's output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl StreamId {
    /// The flag for this stream in a [`Streams`] set.
    pub const fn flag(self) -> Streams {
        match self {
            Self::Stdout => Streams::STDOUT,
            Self::Stderr => Streams::STDERR,
        }
    }

    /// Short name, for logs and thread names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

bitflags! {
    /// A set of output streams, used to track which are still open.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Streams: u8 {
        /// Standard output.
        const STDOUT = 1;
        /// Standard error.
        const STDERR = 1 << 1;
    }
}

/// Events sent by a stream reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Bytes read from the stream, in order.
    Data(Vec<u8>),

    /// The stream reached end-of-file.
    Eof,

    /// Reading failed; the stream is finished.
    Error(String),
}
