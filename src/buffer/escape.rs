//! Escape lexer: Recognize ANSI escape sequences in captured output.
//!
//! Tools commonly colour their diagnostics, so a line can contain far more
//! bytes than it occupies columns. The lexer reports where a sequence ends
//! so the line scanner can skip it without counting it toward the width.
//!
//! A CSI sequence is `ESC [`, any number of parameter bytes (`0x30..=0x3F`,
//! which covers digits and `;`) or intermediate bytes (`0x20..=0x2F`), and a
//! final byte in `0x40..=0x7E`.

/// The escape character.
pub const ESC: u8 = 0x1b;

/// Outcome of lexing at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// The byte at the position does not start an escape sequence.
    None,
    /// A sequence that ends just before the given index.
    Complete(usize),
    /// The input ends before the sequence does.
    Incomplete,
}

/// Lex a possible escape sequence starting at `at`.
///
/// A bare `ESC` that is not followed by `[` is treated as a one-byte
/// sequence. A CSI sequence interrupted by a byte that is neither a
/// parameter nor a final byte ends before that byte, so a stray `ESC [`
/// never swallows a newline.
pub fn scan_escape(bytes: &[u8], at: usize) -> Escape {
    if bytes.get(at) != Some(&ESC) {
        return Escape::None;
    }

    match bytes.get(at + 1) {
        None => Escape::Incomplete,
        Some(b'[') => scan_csi(bytes, at + 2),
        Some(_) => Escape::Complete(at + 1),
    }
}

fn scan_csi(bytes: &[u8], mut i: usize) -> Escape {
    while let Some(&b) = bytes.get(i) {
        match b {
            0x20..=0x3f => i += 1,
            0x40..=0x7e => return Escape::Complete(i + 1),
            _ => return Escape::Complete(i),
        }
    }
    Escape::Incomplete
}
