//! View: The slice of captured output currently on screen.
//!
//! A frame is the output between two row boundaries, drawn from the top of
//! the region with the highlighted span in inverse video. The window only
//! moves when the highlight leaves it, so stepping between nearby
//! references redraws the same rows.

use crate::buffer::InputBuffer;
use crate::pattern::Span;
use crate::terminal::OutputBuffer;

/// A byte range of the output covering whole display rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Offset of the first row drawn.
    pub start: usize,
    /// Offset one past the last byte drawn.
    pub stop: usize,
}

impl Window {
    /// Check whether `span` is fully visible.
    #[inline]
    pub const fn contains(self, span: Span) -> bool {
        span.start >= self.start && span.stop <= self.stop
    }
}

/// Rendering state carried between frames.
#[derive(Debug, Clone)]
pub struct View {
    /// Rows available for output.
    height: usize,
    /// The window drawn last, if any.
    window: Option<Window>,
    /// Rows between the top of the region and the cursor.
    cursor_row: usize,
}

impl View {
    /// Create a view `height` rows tall.
    ///
    /// `cursor_row` is how far below the top of the region the cursor
    /// currently sits, e.g. after the output was echoed while capturing.
    pub const fn new(height: usize, cursor_row: usize) -> Self {
        Self {
            height,
            window: None,
            cursor_row,
        }
    }

    /// The window drawn last.
    pub const fn window(&self) -> Option<Window> {
        self.window
    }

    /// Rows between the top of the region and the cursor.
    pub const fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    /// Choose a window showing `span`, centred on its first row where the
    /// output allows.
    pub fn place(buffer: &InputBuffer, span: Span, height: usize) -> Window {
        let height = height.max(1);
        let rows = buffer.row_count();
        let line = buffer.find_line_index(span.start);

        let first = line
            .saturating_sub(height / 2)
            .min(rows.saturating_sub(height));
        let start = buffer.line_offset(first);

        let stop = if first + height >= rows {
            buffer.len()
        } else {
            buffer.find_window_end(start, height)
        };

        Window { start, stop }
    }

    /// Return to the top of the region and clear it.
    pub fn rewind(&mut self, out: &mut OutputBuffer) {
        out.column_address(1);
        out.cursor_up(self.cursor_row);
        out.erase_down();
        out.reset_attrs();
        self.cursor_row = 0;
    }

    /// Draw a frame highlighting `span`.
    pub fn draw(&mut self, buffer: &InputBuffer, span: Span, out: &mut OutputBuffer) {
        self.rewind(out);

        let window = match self.window {
            Some(window) if window.contains(span) => window,
            _ => Self::place(buffer, span, self.height),
        };
        self.window = Some(window);

        let text = buffer.as_bytes();
        let start = span.start.clamp(window.start, window.stop);
        let stop = span.stop.clamp(start, window.stop);

        out.write_text(&text[window.start..start]);
        out.standout();
        out.write_text(&text[start..stop]);
        out.reset_attrs();
        out.write_text(&text[stop..window.stop]);

        self.cursor_row = rows_below_top(buffer, window);
    }
}

/// Where the cursor ends up after drawing `window`: on the window's last
/// row, or one below it when the window ends with a newline.
fn rows_below_top(buffer: &InputBuffer, window: Window) -> usize {
    if window.stop <= window.start {
        return 0;
    }

    let first = buffer.find_line_index(window.start);
    let last = buffer.find_line_index(window.stop - 1);
    let newline = buffer.as_bytes()[window.stop - 1] == b'\n';

    last - first + usize::from(newline)
}
