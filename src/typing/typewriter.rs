//! Typewriter: Reveals queued text into a scrolling canvas at human pace.
//!
//! The host calls [`Typewriter::advance`] once per frame and
//! [`Typewriter::present`] after it. Each advance reveals every character
//! whose scheduled time has passed, so a slow frame catches up in one
//! call instead of falling behind.
//!
//! ```text
//!            enqueue / Feeder
//!                  │
//!                  ▼
//!   ┌──────────────────────────┐   now >= due   ┌────────────────────┐
//!   │ pending: VecDeque<char>  │ ─────────────▶ │ reveal(c)          │
//!   └──────────────────────────┘                │  '\n' → line feed  │
//!                  ▲                            │  else → re-render  │
//!                  │ due = due + sample()       │         line       │
//!                  └─────────────────────────── └────────────────────┘
//! ```

use super::config::TypewriterConfig;
use super::delay::{DelayModel, Rate};
use super::feed::Feeder;
use crate::buffer::{Buffer, Cell, Rgb};
use crate::error::{ConfigError, RenderError, Result};
use crate::layout::Size;
use crate::render::{CellBackend, RenderBackend};
use crossbeam_channel::{unbounded, Receiver, Sender};
use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// A rectangular region that text is typed into.
///
/// The canvas is owned here and only changes through [`advance`] and
/// [`clear`]. Whenever it changes the dirty flag is set; the host checks it
/// with [`is_dirty`] or [`consume_dirty`], or lets [`present`] do both.
///
/// [`advance`]: Typewriter::advance
/// [`clear`]: Typewriter::clear
/// [`is_dirty`]: Typewriter::is_dirty
/// [`consume_dirty`]: Typewriter::consume_dirty
/// [`present`]: Typewriter::present
pub struct Typewriter<B = CellBackend, R = SmallRng> {
    pending: VecDeque<char>,
    inbox: Receiver<String>,
    inbox_tx: Sender<String>,
    canvas: Buffer,
    backend: B,
    delay: DelayModel<R>,
    fg: Rgb,
    bg: Rgb,
    rate: Rate,
    line_height: u16,
    /// Top row of the line being typed.
    cursor_y: u16,
    /// Characters typed on the current line so far.
    line: String,
    /// When the next character may be revealed. `None` means immediately.
    scheduled: Option<Instant>,
    dirty: bool,
}

impl Typewriter<CellBackend, SmallRng> {
    /// Create a typewriter drawing terminal cells.
    ///
    /// Lines are one row tall unless the config sets a line height.
    pub fn new(text: &str, config: TypewriterConfig) -> Result<Self> {
        let backend = CellBackend::new(config.line_height.unwrap_or(1));
        Self::with_backend(text, config, backend)
    }
}

impl<B: RenderBackend> Typewriter<B, SmallRng> {
    /// Create a typewriter with a custom backend and an OS-seeded delay model.
    pub fn with_backend(text: &str, config: TypewriterConfig, backend: B) -> Result<Self> {
        Self::with_parts(text, config, backend, DelayModel::new())
    }
}

impl<B: RenderBackend, R: Rng> Typewriter<B, R> {
    /// Create a typewriter from all of its collaborators.
    pub fn with_parts(
        text: &str,
        config: TypewriterConfig,
        backend: B,
        delay: DelayModel<R>,
    ) -> Result<Self> {
        config.validate()?;

        let line_height = match config.line_height {
            Some(height) => height,
            None => backend.measure("M")?.height,
        };
        if line_height == 0 {
            return Err(ConfigError::ZeroLineHeight.into());
        }

        let (inbox_tx, inbox) = unbounded();
        let canvas = Buffer::filled(config.size.width, config.size.height, Cell::blank(config.bg));

        debug!(
            size = ?config.size,
            line_height,
            rate = ?config.rate,
            chars = text.chars().count(),
            "typewriter created"
        );

        Ok(Self {
            pending: text.chars().collect(),
            inbox,
            inbox_tx,
            canvas,
            backend,
            delay,
            fg: config.fg,
            bg: config.bg,
            rate: config.rate,
            line_height,
            cursor_y: 0,
            line: String::new(),
            scheduled: None,
            dirty: false,
        })
    }

    /// Append text to the pending queue.
    ///
    /// Does not move the scheduled time of the next reveal.
    pub fn enqueue(&mut self, text: &str) {
        self.drain_inbox();
        self.pending.extend(text.chars());
    }

    /// A handle for enqueueing from other threads.
    pub fn feeder(&self) -> Feeder {
        Feeder::new(self.inbox_tx.clone())
    }

    fn drain_inbox(&mut self) {
        for text in self.inbox.try_iter() {
            trace!(chars = text.chars().count(), "received from feeder");
            self.pending.extend(text.chars());
        }
    }

    /// Reveal every character that is due at `now`.
    ///
    /// Returns the number of characters revealed. Calling again with the
    /// same `now` reveals nothing.
    ///
    /// # Errors
    ///
    /// If the backend fails, the failing character stays at the front of the
    /// queue and the canvas keeps its last good contents. Characters revealed
    /// earlier in the same call stay revealed.
    pub fn advance(&mut self, now: Instant) -> std::result::Result<usize, RenderError> {
        self.drain_inbox();

        let mut revealed = 0;
        while let Some(&c) = self.pending.front() {
            if self.scheduled.is_some_and(|due| now < due) {
                break;
            }

            self.reveal(c)?;
            self.pending.pop_front();
            revealed += 1;

            if self.pending.is_empty() {
                self.scheduled = None;
                debug!(revealed, "pending text drained");
            } else {
                let base = self.scheduled.unwrap_or(now);
                self.scheduled = Some(base + self.delay.sample(self.rate));
            }
        }

        Ok(revealed)
    }

    fn reveal(&mut self, c: char) -> std::result::Result<(), RenderError> {
        if c == '\n' {
            self.line_feed();
            return Ok(());
        }

        self.line.push(c);
        let glyphs = match self.backend.render(&self.line, self.fg, self.bg) {
            Ok(glyphs) => glyphs,
            Err(err) => {
                self.line.pop();
                warn!(char = ?c, error = %err, "render backend failed; typing paused");
                return Err(err);
            }
        };

        let blank = Cell::blank(self.bg);
        self.canvas
            .fill_rect(0, self.cursor_y, self.canvas.width(), self.line_height, blank);
        self.canvas.blit(glyphs.buffer(), 0, self.cursor_y);
        self.dirty = true;

        trace!(char = ?c, y = self.cursor_y, "revealed");
        Ok(())
    }

    /// Move to the next line, scrolling up when it would not fit.
    fn line_feed(&mut self) {
        self.line.clear();
        self.cursor_y = self.cursor_y.saturating_add(self.line_height);

        let height = self.canvas.height();
        if u32::from(self.cursor_y) + u32::from(self.line_height) <= u32::from(height) {
            return;
        }

        let blank = Cell::blank(self.bg);
        self.canvas.scroll_up(self.line_height, blank);
        self.cursor_y = self.cursor_y.saturating_sub(self.line_height);
        self.canvas.fill_rect(
            0,
            self.cursor_y,
            self.canvas.width(),
            height.saturating_sub(self.cursor_y),
            blank,
        );
        self.dirty = true;

        debug!(y = self.cursor_y, "scrolled");
    }

    /// Check whether the canvas changed since it was last consumed.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it.
    #[inline]
    pub const fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// The canvas as currently typed.
    #[inline]
    pub const fn snapshot(&self) -> &Buffer {
        &self.canvas
    }

    /// Copy the canvas into `target` at (x, y) if it changed.
    ///
    /// Returns `true` if anything was copied.
    pub fn present(&mut self, target: &mut Buffer, x: u16, y: u16) -> bool {
        if !self.consume_dirty() {
            return false;
        }
        target.blit(&self.canvas, x, y);
        true
    }

    /// Discard pending text and blank the canvas.
    ///
    /// Overflow graphemes held by the canvas are dropped as well.
    pub fn clear(&mut self) {
        self.drain_inbox();
        self.pending.clear();
        self.canvas.reset(Cell::blank(self.bg));
        self.cursor_y = 0;
        self.line.clear();
        self.scheduled = None;
        self.dirty = true;
    }

    /// Top row of the line being typed.
    #[inline]
    pub const fn cursor_y(&self) -> u16 {
        self.cursor_y
    }

    /// Rows per line.
    #[inline]
    pub const fn line_height(&self) -> u16 {
        self.line_height
    }

    /// Characters typed on the current line.
    #[inline]
    pub fn current_line(&self) -> &str {
        &self.line
    }

    /// Number of characters waiting to be revealed.
    ///
    /// Text sent through a [`Feeder`] is counted once it has been received.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Check whether nothing is queued.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// When the next character may be revealed. `None` means immediately.
    #[inline]
    pub const fn scheduled(&self) -> Option<Instant> {
        self.scheduled
    }

    /// Current typing rate.
    #[inline]
    pub const fn rate(&self) -> Rate {
        self.rate
    }

    /// Change the typing rate. Takes effect from the next scheduled delay.
    pub const fn set_rate(&mut self, rate: Rate) {
        self.rate = rate;
    }

    /// Size of the canvas.
    #[inline]
    pub const fn size(&self) -> Size {
        self.canvas.size()
    }
}

impl<B, R> std::fmt::Debug for Typewriter<B, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typewriter")
            .field("size", &self.canvas.size())
            .field("line_height", &self.line_height)
            .field("cursor_y", &self.cursor_y)
            .field("pending", &self.pending.len())
            .field("rate", &self.rate)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
