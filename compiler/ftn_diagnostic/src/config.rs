//! Diagnostic options.
//!
//! The option layer fills a [`DiagnosticConfig`] once per session. The
//! context reads it on construction and on every [`reset`](crate::DiagnosticsContext::reset).

use ftn_ir::StdFlags;
use rustc_hash::FxHashSet;

use crate::emitter::ColorMode;

/// Width used when output is not a terminal. Large enough that no excerpt
/// is ever scrolled or clipped.
pub const UNBOUNDED_WIDTH: usize = i32::MAX as usize;

/// Width assumed for a terminal that does not report one.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Default error ceiling.
pub const DEFAULT_MAX_ERRORS: usize = 25;

/// How the excerpt width is chosen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TerminalWidth {
    /// `COLUMNS` on a terminal, unbounded otherwise.
    #[default]
    Detect,
    /// Always this many columns.
    Fixed(usize),
    /// Never scroll or clip.
    Unbounded,
}

impl TerminalWidth {
    /// Resolve to a column count.
    ///
    /// `is_tty` says whether the diagnostic stream is a terminal; it only
    /// matters for `Detect`.
    pub fn resolve(self, is_tty: bool) -> usize {
        match self {
            TerminalWidth::Detect if is_tty => {
                parse_columns(std::env::var("COLUMNS").ok().as_deref())
            }
            TerminalWidth::Detect | TerminalWidth::Unbounded => UNBOUNDED_WIDTH,
            TerminalWidth::Fixed(columns) => columns,
        }
    }
}

/// Parse a `COLUMNS` value, falling back to [`DEFAULT_TERMINAL_WIDTH`]
/// unless it is a positive integer.
pub fn parse_columns(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&columns| columns > 0)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Point at which an error becomes final.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommitPoint {
    /// `error_now`.
    Now,
    /// A buffered error flushed by `check_error`.
    Flush,
    /// `error` while output is immediate.
    Immediate,
}

/// Which committed errors end compilation under `-Wfatal-errors`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FatalErrorsPolicy {
    /// Only `error_now`. Flushed and immediate errors are counted but
    /// compilation continues.
    NowOnly,
    /// Only `error_now` and flushed errors. An immediate `error` is
    /// counted but compilation continues.
    #[default]
    NowAndFlush,
    /// Every committed error.
    EveryCommitted,
}

impl FatalErrorsPolicy {
    /// Whether an error committed at `point` is fatal under this policy.
    pub fn applies_to(self, point: CommitPoint) -> bool {
        match self {
            FatalErrorsPolicy::NowOnly => point == CommitPoint::Now,
            FatalErrorsPolicy::NowAndFlush => point != CommitPoint::Immediate,
            FatalErrorsPolicy::EveryCommitted => true,
        }
    }
}

/// The `-W` option that controls a warning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WarningOption {
    /// Not tied to an option; only `-w` drops it.
    Always,
    /// `-W<name>`, e.g. `Named("surprising")`.
    Named(&'static str),
}

/// Configuration for diagnostic reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Committed errors before compilation stops (0 = unlimited).
    pub max_errors: usize,
    /// Drop every warning (`-w`).
    pub inhibit_warnings: bool,
    /// Count warnings as errors (`-Werror`).
    pub warnings_are_errors: bool,
    /// Named warnings turned off (`-Wno-<name>`).
    pub disabled_warnings: FxHashSet<String>,
    /// Named warnings counted as errors (`-Werror=<name>`).
    pub error_warnings: FxHashSet<String>,
    /// Stop at the first committed error (`-Wfatal-errors`).
    pub fatal_errors: bool,
    /// Which errors `fatal_errors` applies to.
    pub fatal_errors_policy: FatalErrorsPolicy,
    /// Standard groups accepted without an error.
    pub allow_std: StdFlags,
    /// Standard groups that draw a warning when used.
    pub warn_std: StdFlags,
    pub terminal_width: TerminalWidth,
    pub color: ColorMode,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            max_errors: DEFAULT_MAX_ERRORS,
            inhibit_warnings: false,
            warnings_are_errors: false,
            disabled_warnings: FxHashSet::default(),
            error_warnings: FxHashSet::default(),
            fatal_errors: false,
            fatal_errors_policy: FatalErrorsPolicy::default(),
            allow_std: StdFlags::DEFAULT_ALLOWED,
            warn_std: StdFlags::DEFAULT_WARNED,
            terminal_width: TerminalWidth::Detect,
            color: ColorMode::Auto,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no error ceiling, a fixed excerpt width and no
    /// colors (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            max_errors: 0,
            terminal_width: TerminalWidth::Fixed(DEFAULT_TERMINAL_WIDTH),
            color: ColorMode::Never,
            ..DiagnosticConfig::default()
        }
    }

    /// Whether a warning under `option` is reported at all.
    pub fn warning_enabled(&self, option: WarningOption) -> bool {
        if self.inhibit_warnings {
            return false;
        }
        match option {
            WarningOption::Always => true,
            WarningOption::Named(name) => !self.disabled_warnings.contains(name),
        }
    }

    /// Whether a warning under `option` also counts as an error.
    pub fn warning_is_error(&self, option: WarningOption) -> bool {
        self.warnings_are_errors
            || matches!(option, WarningOption::Named(name) if self.error_warnings.contains(name))
    }
}

#[cfg(test)]
mod tests;
