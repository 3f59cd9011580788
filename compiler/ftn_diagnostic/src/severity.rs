//! Diagnostic severities and their message labels.

use std::fmt;

/// Severity of a reported diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    /// Non-fatal; may be promoted to an error.
    Warning,
    /// Compilation continues, but the run fails.
    Error,
    /// Compilation stops immediately.
    Fatal,
    /// A consistency failure inside the compiler itself.
    Internal,
}

impl Severity {
    /// Label printed in front of the message text.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "Warning:",
            Severity::Error => "Error:",
            Severity::Fatal => "Fatal Error:",
            Severity::Internal => "Internal Error:",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
            Severity::Internal => write!(f, "internal"),
        }
    }
}
