//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use std::io::Write;

/// Pre-allocated buffer for building a frame of escape sequences and text.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical frame (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write captured text for display in raw mode.
    ///
    /// Raw mode turns off output post-processing, so each `\n` is written as
    /// `\r\n` to return to the first column.
    pub fn write_text(&mut self, text: &[u8]) {
        let mut rest = text;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            self.data.extend_from_slice(&rest[..pos]);
            self.data.extend_from_slice(b"\r\n");
            rest = &rest[pos + 1..];
        }
        self.data.extend_from_slice(rest);
    }

    /// Move the cursor up `rows` rows; nothing is emitted for zero.
    #[inline]
    pub fn cursor_up(&mut self, rows: usize) {
        if rows > 0 {
            let _ = write!(self.data, "\x1b[{rows}A");
        }
    }

    /// Move the cursor to `column` (1-indexed) on the current row.
    #[inline]
    pub fn column_address(&mut self, column: usize) {
        let _ = write!(self.data, "\x1b[{column}G");
    }

    /// Erase from the cursor to the end of the screen.
    #[inline]
    pub fn erase_down(&mut self) {
        self.data.extend_from_slice(b"\x1b[J");
    }

    /// Start inverse video.
    #[inline]
    pub fn standout(&mut self) {
        self.data.extend_from_slice(b"\x1b[7m");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
