//! Input buffer: Captured bytes plus the offsets where terminal rows begin.
//!
//! Output is echoed to the terminal while it is captured, so to redraw it
//! later the selector needs to know how the terminal wrapped it. Each call to
//! [`InputBuffer::feed`] appends a chunk and resolves as many new rows as the
//! data allows. Rows already resolved are never scanned again.

use super::escape::{scan_escape, Escape};

/// Initial byte capacity; the store doubles from here as needed.
const INITIAL_CAPACITY: usize = 8192;

/// Growable byte store with a display-row index.
///
/// `line_offsets[0]` is always 0 and `line_offsets[line_count()]` is the
/// start of the row still being filled.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    /// Every byte received so far.
    bytes: Vec<u8>,
    /// Start offset of each display row, strictly increasing.
    line_offsets: Vec<usize>,
}

impl InputBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut line_offsets = Vec::with_capacity(capacity / 32 + 1);
        line_offsets.push(0);

        Self {
            bytes: Vec::with_capacity(capacity),
            line_offsets,
        }
    }

    /// The captured bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes captured.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if nothing has been captured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of completed display rows.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_offsets.len() - 1
    }

    /// Start offsets of all rows, including the one still being filled.
    #[inline]
    pub fn line_offsets(&self) -> &[usize] {
        &self.line_offsets
    }

    /// Start offset of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > line_count()`.
    #[inline]
    pub fn line_offset(&self, index: usize) -> usize {
        self.line_offsets[index]
    }

    /// Number of rows the output occupies on screen.
    ///
    /// This is the completed rows plus the unfinished last row when it holds
    /// any bytes.
    pub fn row_count(&self) -> usize {
        let tail = self.line_offsets[self.line_count()];
        self.line_count() + usize::from(tail < self.bytes.len())
    }

    /// Append a chunk and index the rows it completes.
    ///
    /// `width` is the terminal width in columns. Returns the number of rows
    /// completed by this chunk.
    pub fn feed(&mut self, chunk: &[u8], width: usize) -> usize {
        self.bytes.extend_from_slice(chunk);

        let width = width.max(1);
        let before = self.line_count();
        let mut start = self.line_offsets[before];

        while let Some(next) = next_line(&self.bytes, start, width) {
            self.line_offsets.push(next);
            start = next;
        }

        self.line_count() - before
    }

    /// Find the row containing `offset`.
    ///
    /// Offsets at or past the start of the last row map to the last row.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty; callers only look up rows once there
    /// is output to show.
    pub fn find_line_index(&self, offset: usize) -> usize {
        assert!(
            !self.is_empty(),
            "line index lookup for offset {offset} on an empty input buffer"
        );

        self.line_offsets
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Start offset of the row `height` rows below the one containing
    /// `offset`, clamped to the last row.
    pub fn find_window_end(&self, offset: usize, height: usize) -> usize {
        let index = (self.find_line_index(offset) + height).min(self.line_count());
        self.line_offsets[index]
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Find where the row starting at `start` ends.
///
/// A row ends after a newline, or before the first printable character that
/// would exceed `width` columns. Escape sequences take no columns and UTF-8
/// continuation bytes belong to the character before them. Returns `None`
/// when the data ends before the row is decided, which includes the case
/// where exactly `width` characters are followed by nothing yet: the next
/// byte may be the newline that closes this row.
pub fn next_line(bytes: &[u8], start: usize, width: usize) -> Option<usize> {
    let mut shown = 0;
    let mut i = start;

    while let Some(&b) = bytes.get(i) {
        if b == b'\n' {
            return Some(i + 1);
        }

        match scan_escape(bytes, i) {
            Escape::Complete(end) => {
                i = end;
                continue;
            }
            Escape::Incomplete => return None,
            Escape::None => {}
        }

        if is_continuation(b) {
            i += 1;
            continue;
        }

        if shown == width {
            return Some(i);
        }

        shown += 1;
        i += 1;
    }

    None
}

#[inline]
const fn is_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}
