//! Cell: One device unit of the typing canvas.
//!
//! A cell is the canvas equivalent of a pixel: it carries the grapheme drawn
//! there (or a blank) plus the foreground and background colors.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Cell Layout (16 bytes)                                       │
//! ├─────────────┬─────────────┬───────────┬───────────┬───────┬───┤
//! │  grapheme   │  len + width│    fg     │    bg     │ flags │pad│
//! │  [u8; 4]    │  u8 + u8    │  [u8; 3]  │  [u8; 3]  │  u8   │ 3 │
//! └─────────────┴─────────────┴───────────┴───────────┴───────┴───┘
//! ```

use bitflags::bitflags;

/// Opaque 24-bit RGB color.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Grey (128, 128, 128)
    pub const GREY: Self = Self::new(128, 128, 128);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Cell-level flags for special states.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Grapheme lives in the owning buffer's overflow table.
        const OVERFLOW = 0b0000_0001;
        /// Right half of a wide (two-column) grapheme.
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single canvas cell.
///
/// Graphemes up to 4 UTF-8 bytes are stored inline. Longer clusters (emoji
/// ZWJ sequences) set [`CellFlags::OVERFLOW`] and keep an index into the
/// owning [`Buffer`](super::Buffer)'s overflow table in the grapheme bytes.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    grapheme: [u8; 4],
    grapheme_len: u8,
    display_width: u8,
    fg: Rgb,
    bg: Rgb,
    flags: CellFlags,
    _padding: [u8; 3],
}

const _: () = assert!(
    std::mem::size_of::<Cell>() == 16,
    "Cell must be exactly 16 bytes"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A blank cell (space, white on black).
    pub const EMPTY: Self = Self::blank(Rgb::BLACK);

    /// A space painted in the given background color.
    #[inline]
    pub const fn blank(bg: Rgb) -> Self {
        Self {
            grapheme: [b' ', 0, 0, 0],
            grapheme_len: 1,
            display_width: 1,
            fg: Rgb::WHITE,
            bg,
            flags: CellFlags::empty(),
            _padding: [0; 3],
        }
    }

    /// Create a cell from any character.
    #[inline]
    pub fn from_char(c: char) -> Self {
        let mut grapheme = [0u8; 4];
        let len = c.encode_utf8(&mut grapheme).len();
        let width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);

        Self {
            grapheme,
            grapheme_len: len as u8,
            display_width: width.min(2) as u8,
            ..Self::EMPTY
        }
    }

    /// Create a cell from a grapheme cluster.
    ///
    /// Returns `None` when the cluster does not fit inline; the caller must
    /// intern it and use [`Cell::overflow`] instead.
    #[inline]
    pub fn from_grapheme(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() > 4 {
            return None;
        }

        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);
        let width = unicode_width::UnicodeWidthStr::width(s);

        Some(Self {
            grapheme,
            grapheme_len: bytes.len() as u8,
            display_width: width.min(2) as u8,
            ..Self::EMPTY
        })
    }

    /// Create an overflow cell pointing at an interned grapheme.
    #[inline]
    pub const fn overflow(index: u32, display_width: u8) -> Self {
        Self {
            grapheme: index.to_le_bytes(),
            grapheme_len: 0,
            display_width,
            flags: CellFlags::OVERFLOW,
            ..Self::EMPTY
        }
    }

    /// Create the filler cell placed after a wide grapheme.
    #[inline]
    pub const fn wide_continuation() -> Self {
        Self {
            grapheme: [0; 4],
            grapheme_len: 0,
            display_width: 0,
            flags: CellFlags::WIDE_CONTINUATION,
            ..Self::EMPTY
        }
    }

    /// The inline grapheme, or `None` for overflow and continuation cells.
    #[inline]
    pub fn grapheme(&self) -> Option<&str> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            return None;
        }
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).ok()
    }

    /// Overflow table index, if this is an overflow cell.
    #[inline]
    pub const fn overflow_index(&self) -> Option<u32> {
        if self.flags.contains(CellFlags::OVERFLOW) {
            Some(u32::from_le_bytes(self.grapheme))
        } else {
            None
        }
    }

    /// Check if this cell uses overflow storage.
    #[inline]
    pub const fn is_overflow(&self) -> bool {
        self.flags.contains(CellFlags::OVERFLOW)
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Display width in columns (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Cell flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grapheme = self.grapheme().unwrap_or("<overflow>");
        f.debug_struct("Cell")
            .field("grapheme", &grapheme)
            .field("width", &self.display_width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
