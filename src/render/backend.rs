//! The render backend seam.

use crate::buffer::{Buffer, Rgb};
use crate::error::RenderError;
use crate::layout::Size;

/// A rendered run of text, ready to be blitted.
#[derive(Debug, Clone)]
pub struct Glyphs {
    buffer: Buffer,
}

impl Glyphs {
    /// Wrap a buffer holding rendered text.
    pub const fn new(buffer: Buffer) -> Self {
        Self { buffer }
    }

    /// Size of the rendered text in cells.
    pub const fn size(&self) -> Size {
        self.buffer.size()
    }

    /// The rendered cells.
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }
}

/// Text measurement and rendering capability supplied by the host.
pub trait RenderBackend {
    /// Size that `text` occupies when rendered on one line.
    fn measure(&self, text: &str) -> Result<Size, RenderError>;

    /// Render `text` on one line in `fg` over `bg`.
    ///
    /// The result covers the whole line height, so blitting it overwrites the
    /// previous rendering of a shorter prefix of the same line.
    fn render(&self, text: &str, fg: Rgb, bg: Rgb) -> Result<Glyphs, RenderError>;
}

impl<B: RenderBackend + ?Sized> RenderBackend for Box<B> {
    fn measure(&self, text: &str) -> Result<Size, RenderError> {
        (**self).measure(text)
    }

    fn render(&self, text: &str, fg: Rgb, bg: Rgb) -> Result<Glyphs, RenderError> {
        (**self).render(text, fg, bg)
    }
}

impl<B: RenderBackend + ?Sized> RenderBackend for &B {
    fn measure(&self, text: &str) -> Result<Size, RenderError> {
        (**self).measure(text)
    }

    fn render(&self, text: &str, fg: Rgb, bg: Rgb) -> Result<Glyphs, RenderError> {
        (**self).render(text, fg, bg)
    }
}
