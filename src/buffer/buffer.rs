//! Buffer: A fixed-size grid of cells.
//!
//! The typing canvas, rendered glyph lines, and host screens are all
//! buffers. Cells are stored contiguously in row-major order.

use super::cell::{Cell, CellFlags, Rgb};
use crate::layout::Size;
use std::collections::HashMap;

/// A grid of cells.
///
/// Access is in row-major order: `index = y * width + x`.
///
/// # Overflow Storage
///
/// Graphemes longer than 4 bytes are interned in a side table. Interning
/// means the same cluster always maps to the same index, so a line that is
/// re-rendered on every keystroke does not grow the table.
#[derive(Clone)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    overflow: Vec<String>,
    interned: HashMap<String, u32>,
}

impl Buffer {
    /// Create a buffer of blank cells.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, Cell::EMPTY)
    }

    /// Create a buffer with every cell set to `cell`.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn filled(width: u16, height: u16, cell: Cell) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![cell; size],
            width,
            height,
            overflow: Vec::new(),
            interned: HashMap::new(),
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Buffer dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` after construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) to a linear index, or `None` if out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set the cell at (x, y). Returns `false` if out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Intern an overflow grapheme and return its index.
    fn intern(&mut self, grapheme: &str) -> u32 {
        if let Some(&idx) = self.interned.get(grapheme) {
            return idx;
        }
        let idx = self.overflow.len() as u32;
        self.overflow.push(grapheme.to_string());
        self.interned.insert(grapheme.to_string(), idx);
        idx
    }

    /// Place a grapheme at (x, y), spilling to overflow storage if needed.
    ///
    /// Wide graphemes also claim (x+1, y) as a continuation cell.
    /// Returns the display width used, or 0 if out of bounds.
    pub fn set_grapheme(&mut self, x: u16, y: u16, grapheme: &str, fg: Rgb, bg: Rgb) -> u8 {
        let Some(idx) = self.index_of(x, y) else {
            return 0;
        };

        let cell = if let Some(cell) = Cell::from_grapheme(grapheme) {
            cell
        } else {
            let width = unicode_width::UnicodeWidthStr::width(grapheme).min(2) as u8;
            Cell::overflow(self.intern(grapheme), width)
        };
        let width = cell.display_width();
        self.cells[idx] = cell.with_fg(fg).with_bg(bg);

        if width == 2 {
            if let Some(next) = self.index_of(x.saturating_add(1), y) {
                self.cells[next] = Cell::wide_continuation().with_fg(fg).with_bg(bg);
            }
        }

        width
    }

    /// The grapheme at (x, y), resolving overflow cells.
    ///
    /// Returns `None` if out of bounds or on a continuation cell.
    pub fn get_grapheme(&self, x: u16, y: u16) -> Option<&str> {
        let cell = self.get(x, y)?;

        if cell.is_wide_continuation() {
            return None;
        }

        if cell.flags().contains(CellFlags::OVERFLOW) {
            let idx = cell.overflow_index()?;
            self.overflow.get(idx as usize).map(String::as_str)
        } else {
            cell.grapheme()
        }
    }

    /// Fill a rectangular region with a cell, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let right = x.saturating_add(width).min(self.width) as usize;
        let x = x as usize;
        if x >= right {
            return;
        }
        for row in y..y.saturating_add(height).min(self.height) {
            let start = (row as usize) * (self.width as usize);
            self.cells[start + x..start + right].fill(cell);
        }
    }

    /// Fill the whole buffer with a cell and drop all overflow graphemes.
    pub fn reset(&mut self, cell: Cell) {
        self.cells.fill(cell);
        self.overflow.clear();
        self.interned.clear();
    }

    /// Shift all rows up by `rows` and fill the rows exposed at the bottom.
    ///
    /// Content in the top `rows` rows is discarded. When `rows` is at
    /// least the height, the whole buffer is filled.
    pub fn scroll_up(&mut self, rows: u16, fill: Cell) {
        let rows = rows.min(self.height) as usize;
        if rows == 0 {
            return;
        }
        let width = self.width as usize;
        let height = self.height as usize;

        // copy_within handles the overlapping source and destination.
        if rows < height {
            self.cells.copy_within(rows * width.., 0);
        }
        self.cells[(height - rows) * width..].fill(fill);
    }

    /// Copy `src` into this buffer with its top-left corner at (x, y).
    ///
    /// Cells that fall outside this buffer are dropped. Overflow graphemes
    /// are re-interned here so the copy does not depend on `src`.
    pub fn blit(&mut self, src: &Self, x: u16, y: u16) {
        for sy in 0..src.height {
            let Some(dy) = y.checked_add(sy).filter(|dy| *dy < self.height) else {
                break;
            };
            for sx in 0..src.width {
                let Some(dx) = x.checked_add(sx).filter(|dx| *dx < self.width) else {
                    break;
                };
                let cell = src.cells[(sy as usize) * (src.width as usize) + (sx as usize)];
                let cell = match cell.overflow_index() {
                    Some(idx) => {
                        let grapheme = src.overflow.get(idx as usize).map_or("", String::as_str);
                        Cell::overflow(self.intern(grapheme), cell.display_width())
                            .with_fg(cell.fg())
                            .with_bg(cell.bg())
                    }
                    None => cell,
                };
                self.set(dx, dy, cell);
            }
        }
    }

    /// The graphemes of row `y` joined into a string.
    ///
    /// Continuation cells are skipped; trailing blanks are kept.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get_grapheme(x, y))
            .collect()
    }

    /// Number of distinct graphemes held in overflow storage.
    pub fn overflow_count(&self) -> usize {
        self.overflow.len()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("overflow_count", &self.overflow_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lettered(width: u16, height: u16) -> Buffer {
        let mut buffer = Buffer::new(width, height);
        for y in 0..height {
            let c = char::from(b'a' + y as u8);
            buffer.fill_rect(0, y, width, 1, Cell::from_char(c));
        }
        buffer
    }

    #[test]
    fn test_buffer_filled() {
        let bg = Rgb::new(1, 2, 3);
        let buffer = Buffer::filled(4, 3, Cell::blank(bg));
        assert_eq!(buffer.len(), 12);
        assert!(buffer.cells().iter().all(|c| c.bg() == bg));
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_buffer_zero_height() {
        Buffer::new(10, 0);
    }

    #[test]
    fn test_buffer_bounds() {
        let buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
    }

    #[test]
    fn test_set_grapheme_wide() {
        let mut buffer = Buffer::new(10, 1);
        assert_eq!(buffer.set_grapheme(0, 0, "日", Rgb::WHITE, Rgb::BLACK), 2);
        assert_eq!(buffer.get_grapheme(0, 0), Some("日"));
        assert!(buffer.get(1, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.row_text(0), format!("日{}", " ".repeat(8)));
    }

    #[test]
    fn test_overflow_is_interned() {
        let mut buffer = Buffer::new(10, 1);
        let family = "👨‍👩‍👧‍👦";
        buffer.set_grapheme(0, 0, family, Rgb::WHITE, Rgb::BLACK);
        buffer.set_grapheme(4, 0, family, Rgb::WHITE, Rgb::BLACK);
        assert_eq!(buffer.overflow_count(), 1);
        assert_eq!(buffer.get_grapheme(4, 0), Some(family));
    }

    #[test]
    fn test_reset_drops_overflow() {
        let mut buffer = Buffer::new(10, 1);
        buffer.set_grapheme(0, 0, "👨‍👩‍👧‍👦", Rgb::WHITE, Rgb::BLACK);

        buffer.fill_rect(0, 0, 10, 1, Cell::EMPTY);
        assert_eq!(buffer.overflow_count(), 1);

        let bg = Rgb::new(9, 9, 9);
        buffer.reset(Cell::blank(bg));
        assert_eq!(buffer.overflow_count(), 0);
        assert!(buffer.cells().iter().all(|c| c.bg() == bg));

        buffer.set_grapheme(0, 0, "👩‍👩‍👦", Rgb::WHITE, Rgb::BLACK);
        assert_eq!(buffer.get_grapheme(0, 0), Some("👩‍👩‍👦"));
        assert_eq!(buffer.overflow_count(), 1);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buffer = Buffer::new(5, 5);
        buffer.fill_rect(3, 3, 10, 10, Cell::from_char('x'));
        assert_eq!(buffer.get_grapheme(4, 4), Some("x"));
        assert_eq!(buffer.get_grapheme(2, 4), Some(" "));
        assert_eq!(buffer.get_grapheme(3, 2), Some(" "));
    }

    #[test]
    fn test_scroll_up_shifts_and_fills() {
        let mut buffer = lettered(3, 4);
        let fill = Cell::blank(Rgb::new(9, 9, 9));
        buffer.scroll_up(1, fill);

        assert_eq!(buffer.row_text(0), "bbb");
        assert_eq!(buffer.row_text(1), "ccc");
        assert_eq!(buffer.row_text(2), "ddd");
        assert_eq!(buffer.row_text(3), "   ");
        assert_eq!(buffer.get(0, 3), Some(&fill));
    }

    #[test]
    fn test_scroll_up_multiple_rows() {
        let mut buffer = lettered(2, 5);
        buffer.scroll_up(2, Cell::EMPTY);
        assert_eq!(buffer.row_text(0), "cc");
        assert_eq!(buffer.row_text(2), "ee");
        assert_eq!(buffer.row_text(3), "  ");
        assert_eq!(buffer.row_text(4), "  ");
    }

    #[test]
    fn test_scroll_up_past_height_clears() {
        let mut buffer = lettered(2, 2);
        buffer.scroll_up(7, Cell::EMPTY);
        assert!(buffer.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn test_blit_clips_and_offsets() {
        let mut dst = Buffer::new(4, 2);
        let src = lettered(3, 2);
        dst.blit(&src, 2, 1);
        assert_eq!(dst.row_text(0), "    ");
        assert_eq!(dst.row_text(1), "  aa");
    }

    #[test]
    fn test_blit_carries_overflow() {
        let mut src = Buffer::new(2, 1);
        let flag = "🏳️‍🌈";
        src.set_grapheme(0, 0, flag, Rgb::WHITE, Rgb::BLACK);

        let mut dst = Buffer::new(4, 1);
        dst.blit(&src, 1, 0);
        assert_eq!(dst.get_grapheme(1, 0), Some(flag));
    }
}
