//! Render module: Text measurement and glyph rendering.
//!
//! The typing canvas never draws text itself. It hands the current line to
//! a [`RenderBackend`] and blits the returned [`Glyphs`]. [`CellBackend`]
//! is the terminal-cell implementation; hosts with their own font stack
//! implement the trait instead.

mod backend;
mod cell_backend;

pub use backend::{Glyphs, RenderBackend};
pub use cell_backend::CellBackend;
