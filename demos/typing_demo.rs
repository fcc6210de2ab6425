//! Typing Demo: Types a short story into an inset region at human pace.
//!
//! A second thread appends a postscript a few seconds in, through a
//! `Feeder`. Press 'q' or Escape to quit.
//!
//! Logs go to stderr and are only enabled when stderr is redirected, since
//! the demo owns the terminal while it runs:
//!
//! `RUST_LOG=typewriter=debug cargo run --example typing_demo 2>typing.log`

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io::{self, IsTerminal};
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use typewriter::{
    Buffer, Cell, OutputBuffer, Rate, Rect, Rgb, TerminalGuard, Typewriter, TypewriterConfig,
};

const STORY: &str = "Hello fellow programmers
We endeavor to type code in precise
ways and sometimes go down a rabbit
hole of bits and bytes.

Debugging our way through to a better
understanding.. but it seems that we
dwell forever in the error realms.

We hope the bug will be revealed
never to infest us again.";

const POSTSCRIPT: &str = "\n\nP.S. This line arrived late, from another thread.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log lines on the alternate screen would corrupt the display.
    if !io::stderr().is_terminal() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let guard = TerminalGuard::enter(true)?;
    let size = guard.size()?;
    let area = Rect::from_size(size.width, size.height).inset(4, 2);
    if area.is_empty() {
        return Err("terminal too small for the demo".into());
    }

    let config = TypewriterConfig::sized(area.width, area.height)
        .with_colors(Rgb::WHITE, Rgb::BLACK)
        .with_rate(Rate::wpm(400.0)?);
    let mut tw = Typewriter::new(STORY, config)?;

    let mut screen = Buffer::filled(size.width, size.height, Cell::blank(Rgb::GREY));
    screen.blit(tw.snapshot(), area.x, area.y);
    let mut out = OutputBuffer::new();
    let mut stdout = io::stdout();
    out.draw_buffer(&screen, 0, 0);
    out.flush_to(&mut stdout)?;

    let feeder = tw.feeder();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(8));
        feeder.push(POSTSCRIPT);
    });

    let frame = Duration::from_secs(1) / 60;
    loop {
        let frame_start = Instant::now();

        if event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    break;
                }
            }
        }

        tw.advance(frame_start)?;
        if tw.present(&mut screen, area.x, area.y) {
            out.clear();
            out.draw_buffer(&screen, 0, 0);
            out.flush_to(&mut stdout)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }

    drop(guard);
    Ok(())
}
