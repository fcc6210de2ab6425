//! Typing module: Human-paced reveal of text into a scrolling canvas.
//!
//! - [`DelayModel`] draws inter-key delays for a [`Rate`]
//! - [`Typewriter`] owns the pending queue, the canvas, and the schedule
//! - [`Feeder`] appends text from other threads
//!
//! # Example
//!
//! ```rust,ignore
//! use typewriter::{Typewriter, TypewriterConfig};
//! use std::time::Instant;
//!
//! let mut tw = Typewriter::new("Hello\nworld", TypewriterConfig::sized(40, 2))?;
//! loop {
//!     tw.advance(Instant::now())?;
//!     if tw.present(&mut screen, 0, 0) {
//!         flush(&screen);
//!     }
//! }
//! ```

mod config;
mod delay;
mod feed;
mod typewriter;

pub use config::TypewriterConfig;
pub use delay::{DelayModel, Rate, BASE_DELAY_MS, CHARS_PER_WORD, MAX_DELAY_MS, MIN_WPM, REFERENCE_WPM};
pub use feed::Feeder;
pub use typewriter::Typewriter;
