//! Diagnostic reporting for the Fortran front-end.
//!
//! Errors and warnings are anchored to source loci and printed with a
//! source excerpt:
//!
//! ```text
//! prog.f90:10.3:
//!
//! x = y +
//!    1
//! Error: Syntax error in expression at (1)
//! ```
//!
//! # Tentative diagnostics
//!
//! The parser tries several interpretations of a statement. While it is
//! guessing, diagnostics are *buffered*: each report overwrites the pending
//! error (or warning) text instead of printing it. Once the statement is
//! decided the parser either commits the pending text with
//! [`DiagnosticsContext::check_error`] or drops it with
//! [`DiagnosticsContext::clear_error`]. Nested guesses save and restore the
//! pending error with [`DiagnosticsContext::push_error`] and
//! [`DiagnosticsContext::pop_error`].
//!
//! # Termination
//!
//! Fatal errors, internal errors and the error ceiling never return control
//! to the parser. They surface as [`Abort`] values, and the driver turns
//! them into a process exit with [`Abort::exit_code`].

mod abort;
mod buffer;
pub mod catalog;
pub mod codec;
mod config;
mod context;
pub mod emitter;
pub mod format;
mod guarantee;
pub mod locus;
mod logging;
mod severity;

pub use abort::{Abort, FAILURE_EXIT_CODE, FATAL_EXIT_CODE, ICE_EXIT_CODE};
pub use buffer::{ErrorBuffer, SavedErrorState, Tally};
pub use catalog::{IdentityCatalog, MessageCatalog, TranslationTable};
pub use config::{
    CommitPoint, DiagnosticConfig, FatalErrorsPolicy, TerminalWidth, WarningOption,
    UNBOUNDED_WIDTH,
};
pub use context::{Counts, DiagnosticsContext, Notification};
pub use emitter::ColorMode;
pub use format::{Arg, FormatError};
pub use guarantee::ErrorGuaranteed;
pub use logging::init_tracing;
pub use severity::Severity;

pub use ftn_ir::{Locus, SourceFile, SourceLine, StdFlags};
