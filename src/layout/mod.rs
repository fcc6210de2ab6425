//! Layout module: Geometry primitives for placing the typing region.

mod rect;

pub use rect::{Rect, Size};
