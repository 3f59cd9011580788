//! Terminal Output
//!
//! Immediate diagnostic output with optional ANSI color support.

use std::io::Write;

use crate::Severity;

use super::TextSink;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;35m"; // Bold magenta
    pub const RESET: &str = "\x1b[0m";
}

/// Initial capacity of the pending line.
const LINE_CAPACITY: usize = 1000;

/// Color output mode for severity labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Wrap a severity label in its color, if colors are enabled.
pub(crate) fn paint(label: &str, severity: Severity, colors: bool) -> String {
    if !colors {
        return label.to_string();
    }
    let color = match severity {
        Severity::Warning => colors::WARNING,
        Severity::Error | Severity::Fatal | Severity::Internal => colors::ERROR,
    };
    format!("{color}{label}{}", colors::RESET)
}

/// Line-buffered writer for immediate diagnostics.
///
/// Characters collect into a pending line that is handed to the writer
/// whole when a newline arrives, so a diagnostic is never interleaved
/// character-by-character with other output on the same stream.
pub struct TerminalSink<W: Write> {
    writer: W,
    line: String,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W) -> Self {
        TerminalSink {
            writer,
            line: String::with_capacity(LINE_CAPACITY),
        }
    }

    /// Write already-formatted text, e.g. a flushed [`ErrorBuffer`](crate::ErrorBuffer).
    pub fn write_raw(&mut self, text: &str) {
        self.write_pending_line();
        let _ = self.writer.write_all(text.as_bytes());
    }

    /// Write any partial line and flush the writer.
    pub fn flush(&mut self) {
        self.write_pending_line();
        let _ = self.writer.flush();
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Text accepted but not yet written because no newline arrived.
    pub fn pending_line(&self) -> &str {
        &self.line
    }

    fn write_pending_line(&mut self) {
        if !self.line.is_empty() {
            let _ = self.writer.write_all(self.line.as_bytes());
            self.line.clear();
        }
    }
}

impl<W: Write> TextSink for TerminalSink<W> {
    fn put_char(&mut self, c: char) {
        self.line.push(c);
        if c == '\n' {
            self.write_pending_line();
        }
    }
}

#[cfg(test)]
mod tests;
