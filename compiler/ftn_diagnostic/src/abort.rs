//! Unrecoverable outcomes.
//!
//! Paths that end compilation return an [`Abort`] instead of exiting. The
//! diagnostic has already been written by the time one is returned; the
//! driver only has to unwind and exit with [`Abort::exit_code`].

use thiserror::Error;

use crate::FormatError;

/// Exit status after a fatal error.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Exit status after ordinary errors.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Exit status after an internal compiler error.
pub const ICE_EXIT_CODE: i32 = 4;

/// Reason compilation cannot continue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Abort {
    /// A fatal diagnostic was printed, including the error ceiling.
    #[error("fatal error: {message}")]
    Fatal { message: String },
    /// An error was committed while fatal-errors mode is on.
    #[error("compilation terminated due to -Wfatal-errors")]
    FatalErrors,
    /// A consistency failure in the compiler.
    #[error("internal compiler error: {message}")]
    Internal { message: String },
    /// An internal error after earlier errors, most likely caused by them.
    #[error("internal error after previous errors")]
    InternalAfterErrors,
}

impl Abort {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Abort::Fatal { .. } | Abort::FatalErrors => FATAL_EXIT_CODE,
            Abort::Internal { .. } => ICE_EXIT_CODE,
            Abort::InternalAfterErrors => FAILURE_EXIT_CODE,
        }
    }

    /// Whether this is an internal compiler error.
    pub fn is_internal(&self) -> bool {
        matches!(self, Abort::Internal { .. } | Abort::InternalAfterErrors)
    }
}

impl From<FormatError> for Abort {
    fn from(err: FormatError) -> Self {
        Abort::Internal {
            message: err.to_string(),
        }
    }
}
