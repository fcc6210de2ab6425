//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::buffer::{Buffer, Rgb};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` so a
/// presented frame never shows half-drawn.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            fg: None,
            bg: None,
        }
    }

    /// Create a buffer sized for a typical terminal region (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
        self.fg = None;
        self.bg = None;
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Move cursor to (x, y), 0-indexed.
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        let _ = write!(self.data, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1);
    }

    /// Set foreground color unless it is already active.
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        if self.fg != Some(color) {
            let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
            self.fg = Some(color);
        }
    }

    /// Set background color unless it is already active.
    #[inline]
    pub fn set_bg(&mut self, color: Rgb) {
        if self.bg != Some(color) {
            let _ = write!(self.data, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
            self.bg = Some(color);
        }
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
        self.fg = None;
        self.bg = None;
    }

    /// Draw every cell of `buffer` with its top-left corner at (x, y).
    pub fn draw_buffer(&mut self, buffer: &Buffer, x: u16, y: u16) {
        for row in 0..buffer.height() {
            self.cursor_move(x, y.saturating_add(row));
            for col in 0..buffer.width() {
                let Some(cell) = buffer.get(col, row) else {
                    continue;
                };
                if cell.is_wide_continuation() {
                    continue;
                }
                self.set_fg(cell.fg());
                self.set_bg(cell.bg());
                let grapheme = buffer.get_grapheme(col, row).unwrap_or(" ");
                self.data.extend_from_slice(grapheme.as_bytes());
            }
        }
        self.reset_attrs();
    }

    /// Flush to a writer in a single syscall.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
