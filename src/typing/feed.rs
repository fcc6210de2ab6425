//! Feeder: Cross-thread handle for appending text.

use crossbeam_channel::Sender;

/// Appends text to a [`Typewriter`](super::Typewriter) from any thread.
///
/// Text sent here is moved into the pending queue the next time the owner
/// calls `enqueue` or `advance`, in the order it was sent.
#[derive(Debug, Clone)]
pub struct Feeder {
    tx: Sender<String>,
}

impl Feeder {
    pub(crate) const fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }

    /// Queue `text` for typing.
    ///
    /// Returns `false` if the typewriter has been dropped.
    pub fn push(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.is_empty() {
            return true;
        }
        self.tx.send(text).is_ok()
    }
}
