//! # Typewriter
//!
//! Human-paced "typewriter effect" text rendering for terminal regions.
//!
//! Text is revealed one character at a time into a fixed-size cell canvas,
//! with inter-key delays drawn from a model of real human typing. When the
//! text runs past the bottom of the region, the canvas scrolls up a line.
//!
//! ## Core Concepts
//!
//! - **Delay model**: Normally distributed pauses scaled to a WPM rate
//! - **Catch-up scheduling**: A late frame reveals everything that is due
//! - **Whole-line re-render**: Each keystroke re-renders the current line
//! - **Dirty flag**: Hosts copy the canvas out only when it changed
//!
//! ## Example
//!
//! ```rust,ignore
//! use typewriter::{Buffer, Rate, Typewriter, TypewriterConfig};
//! use std::time::Instant;
//!
//! let config = TypewriterConfig::sized(60, 10).with_rate(Rate::wpm(120.0)?);
//! let mut tw = Typewriter::new("Hello fellow programmers\n", config)?;
//! let mut screen = Buffer::new(80, 24);
//!
//! tw.advance(Instant::now())?;
//! tw.present(&mut screen, 10, 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod error;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod typing;

// Re-exports for convenience
pub use buffer::{Buffer, Cell, CellFlags, Rgb};
pub use error::{ConfigError, Error, RenderError, Result};
pub use layout::{Rect, Size};
pub use render::{CellBackend, Glyphs, RenderBackend};
pub use terminal::{OutputBuffer, TerminalGuard};
pub use typing::{DelayModel, Feeder, Rate, Typewriter, TypewriterConfig};
