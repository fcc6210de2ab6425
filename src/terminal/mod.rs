//! Terminal module: Host-side helpers for showing a canvas in a terminal.
//!
//! The typing core never touches the terminal. Hosts that want one use
//! [`TerminalGuard`] for the raw-mode lifecycle and [`OutputBuffer`] to
//! flush a presented buffer in a single write.

mod guard;
mod output;

pub use guard::TerminalGuard;
pub use output::OutputBuffer;
