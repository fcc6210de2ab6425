//! Buffer module: The cell grid used for the canvas and rendered text.
//!
//! - [`Cell`]: One device unit, a grapheme plus colors
//! - [`Buffer`]: A fixed-size grid of cells
//! - [`Rgb`]: Opaque true-color value

mod cell;
#[allow(clippy::module_inception)]
mod buffer;

pub use cell::{Cell, CellFlags, Rgb};
pub use buffer::Buffer;
