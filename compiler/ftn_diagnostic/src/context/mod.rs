//! Diagnostic state for one compilation.
//!
//! [`DiagnosticsContext`] owns the output stream, the two tentative buffers
//! and the counters. Every report goes through it:
//!
//! - immediate reports print at once and are counted at once;
//! - buffered reports overwrite the pending error or warning, and are only
//!   counted when [`check_error`](DiagnosticsContext::check_error) or
//!   [`check_warning`](DiagnosticsContext::check_warning) flushes them.
//!
//! Paths that end compilation return [`Abort`].

use std::io::{self, IsTerminal, Write};
use std::rc::Rc;

use ftn_ir::{Locus, StdFlags};
use tracing::{debug, trace};

use crate::buffer::{ErrorBuffer, SavedErrorState, Tally};
use crate::catalog::{IdentityCatalog, MessageCatalog};
use crate::config::{CommitPoint, DiagnosticConfig, WarningOption};
use crate::emitter::{paint, TerminalSink, TextSink};
use crate::format::{Arg, FormatError, FormatSpec};
use crate::{Abort, ErrorGuaranteed, Severity};

/// Committed diagnostics so far. Buffered reports are not included until
/// they are flushed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Counts {
    pub warnings: usize,
    pub errors: usize,
}

/// What using a language feature would draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Notification {
    Silent,
    Warning,
    Error,
}

/// Where a report is written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Destination {
    Terminal,
    ErrorBuffer,
    WarningBuffer,
}

/// Error and warning reporting for one compilation session.
///
/// Not `Send`: loci share line buffers through `Rc`.
pub struct DiagnosticsContext<W: Write = io::Stderr> {
    config: DiagnosticConfig,
    terminal: TerminalSink<W>,
    is_tty: bool,
    /// Excerpt width in columns.
    width: usize,
    colors: bool,
    catalog: Rc<dyn MessageCatalog>,
    error_buffer: ErrorBuffer,
    warning_buffer: ErrorBuffer,
    /// Reports go to the buffers instead of the terminal.
    buffered: bool,
    /// Errors are reported as warnings until the next `clear_error`.
    warnings_not_errors: bool,
    suppress_depth: usize,
    errors: usize,
    warnings: usize,
    current_locus: Option<Locus>,
}

impl DiagnosticsContext<io::Stderr> {
    /// Report to standard error, detecting whether it is a terminal.
    pub fn stderr(config: DiagnosticConfig) -> Self {
        let stderr = io::stderr();
        let is_tty = stderr.is_terminal();
        DiagnosticsContext::new(config, stderr, is_tty)
    }
}

impl<W: Write> DiagnosticsContext<W> {
    /// Create a context writing to `writer`.
    ///
    /// `is_tty` drives width detection and automatic colors.
    pub fn new(config: DiagnosticConfig, writer: W, is_tty: bool) -> Self {
        let width = config.terminal_width.resolve(is_tty);
        let colors = config.color.should_use_colors(is_tty);
        debug!(width, colors, is_tty, "diagnostics initialized");
        DiagnosticsContext {
            config,
            terminal: TerminalSink::new(writer),
            is_tty,
            width,
            colors,
            catalog: Rc::new(IdentityCatalog),
            error_buffer: ErrorBuffer::new(),
            warning_buffer: ErrorBuffer::new(),
            buffered: false,
            warnings_not_errors: false,
            suppress_depth: 0,
            errors: 0,
            warnings: 0,
            current_locus: None,
        }
    }

    /// Translate templates and labels through `catalog`.
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl MessageCatalog + 'static) -> Self {
        self.catalog = Rc::new(catalog);
        self
    }

    /// Start a new source file: re-detect the width, zero the counts and
    /// return to immediate output.
    pub fn reset(&mut self) {
        self.width = self.config.terminal_width.resolve(self.is_tty);
        self.errors = 0;
        self.warnings = 0;
        self.buffered = false;
        debug!(width = self.width, "diagnostics reset");
    }

    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Excerpt width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The output stream.
    pub fn writer(&self) -> &W {
        self.terminal.writer()
    }

    /// Write any partial output line and flush the stream.
    pub fn flush(&mut self) {
        self.terminal.flush();
    }

    // Mode setters

    /// Switch between buffered and immediate output. Affects later reports
    /// only; pending buffers are left alone.
    pub fn set_buffered(&mut self, buffered: bool) {
        trace!(buffered, "buffering");
        self.buffered = buffered;
    }

    pub fn is_buffered(&self) -> bool {
        self.buffered
    }

    /// Report later errors as warnings until the next [`clear_error`](Self::clear_error).
    pub fn set_errors_to_warnings(&mut self, on: bool) {
        self.warnings_not_errors = on;
    }

    /// Count committed warnings as errors (`-Werror`).
    pub fn set_warnings_as_errors(&mut self, on: bool) {
        self.config.warnings_are_errors = on;
    }

    /// Locus used by `%C`.
    pub fn set_current_locus(&mut self, locus: Option<Locus>) {
        self.current_locus = locus;
    }

    pub fn current_locus(&self) -> Option<&Locus> {
        self.current_locus.as_ref()
    }

    // Reports

    /// Report a warning controlled by `option`.
    ///
    /// Returns whether it was issued: printed, or buffered for a later
    /// flush. Dropped when `option` is disabled, warnings are inhibited or
    /// reports are suppressed.
    pub fn warning(
        &mut self,
        option: WarningOption,
        msgid: &str,
        args: &[Arg<'_>],
    ) -> Result<bool, Abort> {
        if !self.config.warning_enabled(option) || self.suppress_depth > 0 {
            trace!(msgid, ?option, "warning dropped");
            return Ok(false);
        }
        let destination = self.destination(Destination::WarningBuffer);
        self.report(Severity::Warning, None, msgid, args, destination)?;
        let tally = self.warning_tally(option);
        if self.buffered {
            self.warning_buffer.set_tally(tally);
            debug!(msgid, ?tally, "warning buffered");
            return Ok(true);
        }
        self.commit(tally)?;
        debug!(msgid, warnings = self.warnings, "warning");
        Ok(true)
    }

    /// Report a warning immediately, even while buffering.
    ///
    /// Suppression does not apply. Returns whether it was printed.
    pub fn warning_now(
        &mut self,
        option: WarningOption,
        msgid: &str,
        args: &[Arg<'_>],
    ) -> Result<bool, Abort> {
        if !self.config.warning_enabled(option) {
            return Ok(false);
        }
        self.report(Severity::Warning, None, msgid, args, Destination::Terminal)?;
        let tally = self.warning_tally(option);
        self.commit(tally)?;
        debug!(msgid, warnings = self.warnings, "immediate warning");
        Ok(true)
    }

    /// Report an error.
    ///
    /// Becomes a warning while errors are demoted, and is dropped while
    /// reports are suppressed.
    pub fn error(&mut self, msgid: &str, args: &[Arg<'_>]) -> Result<(), Abort> {
        if self.warnings_not_errors {
            return self.warning(WarningOption::Always, msgid, args).map(drop);
        }
        if self.suppress_depth > 0 {
            trace!(msgid, "error dropped");
            return Ok(());
        }
        let destination = self.destination(Destination::ErrorBuffer);
        self.report(Severity::Error, None, msgid, args, destination)?;
        if self.buffered {
            debug!(msgid, "error buffered");
            return Ok(());
        }
        self.increment_error_count()?;
        debug!(msgid, errors = self.errors, "error");
        self.check_fatal_errors(CommitPoint::Immediate)
    }

    /// Report an error immediately, even while buffering.
    ///
    /// Suppression does not apply. Ends compilation in fatal-errors mode.
    pub fn error_now(&mut self, msgid: &str, args: &[Arg<'_>]) -> Result<(), Abort> {
        self.report(Severity::Error, None, msgid, args, Destination::Terminal)?;
        self.increment_error_count()?;
        debug!(msgid, errors = self.errors, "immediate error");
        self.check_fatal_errors(CommitPoint::Now)
    }

    /// Report a fatal error. Never buffered and never suppressed.
    pub fn fatal(&mut self, msgid: &str, args: &[Arg<'_>]) -> Abort {
        let message = match self.message_text(msgid, args) {
            Ok(message) => message,
            Err(err) => return self.bug(&err),
        };
        if let Err(err) =
            self.report_unchecked(Severity::Fatal, None, msgid, args, Destination::Terminal)
        {
            return self.bug(&err);
        }
        self.terminal.flush();
        debug!(%message, "fatal error");
        Abort::Fatal { message }
    }

    /// Report a compiler bug.
    ///
    /// After earlier errors the bug is most likely a consequence of them,
    /// so nothing is printed and the run just fails.
    pub fn internal_error(&mut self, msgid: &str, args: &[Arg<'_>]) -> Abort {
        if self.errors > 0 {
            debug!(msgid, errors = self.errors, "internal error after errors");
            return Abort::InternalAfterErrors;
        }
        let message = match self.message_text(msgid, args) {
            Ok(message) => message,
            Err(err) => return self.bug(&err),
        };
        if let Err(err) =
            self.report_unchecked(Severity::Internal, None, msgid, args, Destination::Terminal)
        {
            return self.bug(&err);
        }
        self.terminal.flush();
        debug!(%message, "internal error");
        Abort::Internal { message }
    }

    /// Report use of a feature from language standard `std`.
    ///
    /// Returns `Ok(true)` when compilation may treat the use as accepted:
    /// the feature is allowed, or only draws a warning that is not promoted
    /// to an error.
    pub fn notify_std(
        &mut self,
        std: StdFlags,
        msgid: &str,
        args: &[Arg<'_>],
    ) -> Result<bool, Abort> {
        let warning = self.warns_for(std);
        if self.config.allow_std.intersects(std) && !warning {
            return Ok(true);
        }
        if self.suppress_depth > 0 {
            return Ok(warning);
        }
        let Some(feature) = std.feature_label() else {
            return Err(self.internal_error(
                "Unexpected standard flags %u in notify_std",
                &[Arg::UInt(std.bits())],
            ));
        };

        let (severity, buffer) = if warning {
            (Severity::Warning, Destination::WarningBuffer)
        } else {
            (Severity::Error, Destination::ErrorBuffer)
        };
        let destination = self.destination(buffer);
        self.report(severity, Some(feature), msgid, args, destination)?;

        let accepted = warning && !self.config.warnings_are_errors;
        let tally = if accepted { Tally::Warning } else { Tally::Error };
        if self.buffered {
            if warning {
                self.warning_buffer.set_tally(tally);
            }
        } else {
            self.commit(tally)?;
        }
        debug!(feature, severity = %severity, buffered = self.buffered, "standard notification");
        Ok(accepted)
    }

    /// Classify a feature without reporting anything.
    pub fn notification_std(&self, std: StdFlags) -> Notification {
        let warning = self.warns_for(std);
        if self.config.allow_std.intersects(std) && !warning {
            Notification::Silent
        } else if warning {
            Notification::Warning
        } else {
            Notification::Error
        }
    }

    fn warning_tally(&self, option: WarningOption) -> Tally {
        if self.config.warning_is_error(option) {
            Tally::WarningAndError
        } else {
            Tally::Warning
        }
    }

    fn warns_for(&self, std: StdFlags) -> bool {
        self.config.warn_std.intersects(std) && !self.config.inhibit_warnings
    }

    // Buffer control

    /// Whether a buffered error is pending.
    pub fn error_flag_test(&self) -> bool {
        self.error_buffer.is_pending()
    }

    /// Drop the pending error and stop demoting errors to warnings.
    pub fn clear_error(&mut self) {
        trace!(pending = self.error_buffer.is_pending(), "clear error");
        self.error_buffer.clear();
        self.warnings_not_errors = false;
    }

    /// Drop the pending warning.
    pub fn clear_warning(&mut self) {
        trace!(pending = self.warning_buffer.is_pending(), "clear warning");
        self.warning_buffer.clear();
    }

    /// Flush a pending warning. Returns whether one was printed.
    ///
    /// A warning promoted to an error when it was reported is counted as
    /// an error now, so the ceiling applies.
    pub fn check_warning(&mut self) -> Result<bool, Abort> {
        if !self.warning_buffer.is_pending() {
            return Ok(false);
        }
        let tally = self.warning_buffer.tally();
        self.terminal.write_raw(self.warning_buffer.text());
        self.warning_buffer.clear();
        self.commit(tally)?;
        debug!(?tally, warnings = self.warnings, errors = self.errors, "flushed warning");
        Ok(true)
    }

    /// Flush a pending error. Returns whether one was printed.
    pub fn check_error(&mut self) -> Result<bool, Abort> {
        if !self.error_buffer.is_pending() {
            return Ok(false);
        }
        self.terminal.write_raw(self.error_buffer.text());
        self.error_buffer.clear();
        self.increment_error_count()?;
        debug!(errors = self.errors, "flushed error");
        self.check_fatal_errors(CommitPoint::Flush)?;
        Ok(true)
    }

    /// Set the pending error aside for a nested speculative parse. The
    /// error buffer is left empty.
    pub fn push_error(&mut self) -> SavedErrorState {
        self.error_buffer.save()
    }

    /// Put back a saved error, replacing whatever the nested parse left.
    pub fn pop_error(&mut self, saved: SavedErrorState) {
        self.error_buffer.restore(saved);
    }

    /// Discard a saved error.
    pub fn free_error(&mut self, saved: SavedErrorState) {
        trace!(pending = saved.is_pending(), "freed error state");
        drop(saved);
    }

    // Suppression

    /// Drop errors and warnings until the matching [`pop_suppress`](Self::pop_suppress).
    pub fn push_suppress(&mut self) {
        self.suppress_depth += 1;
        trace!(depth = self.suppress_depth, "suppress");
    }

    pub fn pop_suppress(&mut self) -> Result<(), Abort> {
        if self.suppress_depth == 0 {
            return Err(self.internal_error("Unbalanced pop of error suppression", &[]));
        }
        self.suppress_depth -= 1;
        trace!(depth = self.suppress_depth, "unsuppress");
        Ok(())
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_depth > 0
    }

    // Counts

    pub fn counts(&self) -> Counts {
        Counts {
            warnings: self.warnings,
            errors: self.errors,
        }
    }

    /// Proof that an error was committed, if any was.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.errors)
    }

    // Internals

    fn destination(&self, buffer: Destination) -> Destination {
        if self.buffered {
            buffer
        } else {
            Destination::Terminal
        }
    }

    /// Format and write one diagnostic. A malformed template is reported
    /// as a compiler bug.
    fn report(
        &mut self,
        severity: Severity,
        feature: Option<&str>,
        msgid: &str,
        args: &[Arg<'_>],
        destination: Destination,
    ) -> Result<(), Abort> {
        self.report_unchecked(severity, feature, msgid, args, destination)
            .map_err(|err| self.bug(&err))
    }

    fn report_unchecked(
        &mut self,
        severity: Severity,
        feature: Option<&str>,
        msgid: &str,
        args: &[Arg<'_>],
        destination: Destination,
    ) -> Result<(), FormatError> {
        let catalog = Rc::clone(&self.catalog);
        let spec = FormatSpec::parse(catalog.translate(msgid))?;
        let resolved = spec.resolve(args, self.current_locus.as_ref())?;

        let mut label = paint(catalog.translate(severity.label()), severity, self.colors);
        if let Some(feature) = feature {
            label.push(' ');
            label.push_str(catalog.translate(feature));
        }

        let width = self.width;
        match destination {
            Destination::Terminal => resolved.print(&mut self.terminal, &label, width),
            Destination::ErrorBuffer => {
                self.error_buffer.begin();
                resolved.print(&mut self.error_buffer, &label, width)
            }
            Destination::WarningBuffer => {
                self.warning_buffer.begin();
                resolved.print(&mut self.warning_buffer, &label, width)
            }
        }
    }

    /// Message body with loci as `(1)`/`(2)`, for [`Abort`] payloads.
    fn message_text(&self, msgid: &str, args: &[Arg<'_>]) -> Result<String, FormatError> {
        let spec = FormatSpec::parse(self.catalog.translate(msgid))?;
        let resolved = spec.resolve(args, self.current_locus.as_ref())?;
        let mut text = String::new();
        resolved.emit(&mut text);
        Ok(text)
    }

    /// Count a printed report.
    fn commit(&mut self, tally: Tally) -> Result<(), Abort> {
        match tally {
            Tally::Warning => {
                self.warnings += 1;
                Ok(())
            }
            Tally::WarningAndError => {
                self.warnings += 1;
                self.increment_error_count()
            }
            Tally::Error => self.increment_error_count(),
        }
    }

    fn increment_error_count(&mut self) -> Result<(), Abort> {
        self.errors += 1;
        let max = self.config.max_errors;
        if max != 0 && self.errors >= max {
            debug!(errors = self.errors, max, "error ceiling reached");
            return Err(self.fatal(
                "Error count reached limit of %lu.",
                &[Arg::ULong(max as u64)],
            ));
        }
        Ok(())
    }

    fn check_fatal_errors(&self, point: CommitPoint) -> Result<(), Abort> {
        if self.config.fatal_errors && self.config.fatal_errors_policy.applies_to(point) {
            debug!(?point, "fatal errors");
            return Err(Abort::FatalErrors);
        }
        Ok(())
    }

    /// A diagnostic call that broke the format contract.
    fn bug(&mut self, err: &FormatError) -> Abort {
        debug!(%err, "malformed diagnostic");
        if self.errors > 0 {
            return Abort::InternalAfterErrors;
        }
        let message = err.to_string();
        let label = paint(Severity::Internal.label(), Severity::Internal, self.colors);
        self.terminal.put_str(&label);
        self.terminal.put_char(' ');
        self.terminal.put_str(&message);
        self.terminal.put_char('\n');
        self.terminal.flush();
        Abort::Internal { message }
    }
}
