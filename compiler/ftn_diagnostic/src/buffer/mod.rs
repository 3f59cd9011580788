//! Deferred diagnostic text.
//!
//! While the parser is guessing, each error or warning is formatted into an
//! [`ErrorBuffer`] instead of the terminal. A buffer holds at most one
//! message: starting a new report overwrites the previous one. The text is
//! committed by flushing it, or dropped by clearing it.

use tracing::trace;

use crate::emitter::TextSink;

/// Capacity reserved on the first write; later growth doubles.
const INITIAL_CAPACITY: usize = 1000;

/// Which counters a pending message bumps once it is flushed.
///
/// Fixed when the message is reported, so a flushed message is counted
/// the same as it would have been if printed at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tally {
    #[default]
    Warning,
    /// A warning promoted by `-Werror`: counted as both.
    WarningAndError,
    /// A rejected standard-conformance warning: counted as an error only.
    Error,
}

/// One pending diagnostic message.
///
/// Invariant: the text is empty whenever the buffer is not pending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorBuffer {
    text: String,
    pending: bool,
    tally: Tally,
}

impl ErrorBuffer {
    pub fn new() -> Self {
        ErrorBuffer::default()
    }

    /// Whether a message is waiting to be flushed.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The pending message, exactly as it will be printed.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How the pending message is counted when flushed.
    #[inline]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub(crate) fn set_tally(&mut self, tally: Tally) {
        self.tally = tally;
    }

    /// Start a new message, discarding any previous one.
    pub fn begin(&mut self) {
        self.text.clear();
        self.pending = true;
        self.tally = Tally::default();
    }

    /// Drop the pending message. The allocation is kept.
    pub fn clear(&mut self) {
        self.text.clear();
        self.pending = false;
        self.tally = Tally::default();
    }

    /// Move the current state into a snapshot, leaving this buffer empty.
    pub(crate) fn save(&mut self) -> SavedErrorState {
        let saved = SavedErrorState {
            pending: self.pending,
            text: self.text.clone(),
            tally: self.tally,
        };
        self.clear();
        trace!(pending = saved.pending, bytes = saved.text.len(), "saved error state");
        saved
    }

    /// Replace the current state with a snapshot. Nothing is merged.
    pub(crate) fn restore(&mut self, saved: SavedErrorState) {
        trace!(pending = saved.pending, bytes = saved.text.len(), "restored error state");
        self.text.clear();
        self.text.push_str(&saved.text);
        self.pending = saved.pending;
        self.tally = saved.tally;
    }
}

impl TextSink for ErrorBuffer {
    fn put_char(&mut self, c: char) {
        if self.text.len() + c.len_utf8() > self.text.capacity() {
            let grow = self.text.capacity().max(INITIAL_CAPACITY);
            self.text.reserve_exact(grow);
        }
        self.text.push(c);
    }
}

/// Snapshot of the pending error taken around a nested speculative parse.
///
/// Produced by [`DiagnosticsContext::push_error`](crate::DiagnosticsContext::push_error)
/// and released exactly once, either by restoring it with `pop_error` or by
/// discarding it with `free_error`. Both take the snapshot by value.
#[must_use = "a saved error state must be restored with `pop_error` or discarded with `free_error`"]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedErrorState {
    pending: bool,
    text: String,
    tally: Tally,
}

impl SavedErrorState {
    /// Whether an error was pending when the snapshot was taken.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The saved message text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
