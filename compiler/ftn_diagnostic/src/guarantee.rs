//! Proof that an error was reported.

use std::fmt;

/// Type-level proof that at least one error was committed.
///
/// Only [`DiagnosticsContext::has_errors`](crate::DiagnosticsContext::has_errors)
/// hands these out, so a phase returning `Err(ErrorGuaranteed)` cannot fail
/// silently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Proof from a committed error count. `None` when no error was reported.
    pub(crate) fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then_some(ErrorGuaranteed(()))
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}
