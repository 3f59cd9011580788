//! Diagnostic Output
//!
//! Diagnostic text is produced one character at a time into a [`TextSink`]:
//! - [`TerminalSink`]: immediate output, line-buffered onto a writer
//! - [`ErrorBuffer`](crate::ErrorBuffer): deferred output for tentative diagnostics
//! - `String`: plain capture, used for abort messages and tests
//!
//! The context picks the sink per report from its buffering flag, so every
//! rendering routine is written once against the trait.

mod terminal;

pub use terminal::{ColorMode, TerminalSink};
pub(crate) use terminal::paint;

/// Room for the decimal digits of any `u64`.
const INT_BUF_LEN: usize = 20;

/// Append-only character stream.
pub trait TextSink {
    /// Append a single character.
    fn put_char(&mut self, c: char);

    /// Append a string.
    fn put_str(&mut self, s: &str) {
        for c in s.chars() {
            self.put_char(c);
        }
    }

    /// Append an unsigned integer in decimal.
    fn put_uint(&mut self, value: u64) {
        let mut digits = [0u8; INT_BUF_LEN];
        let mut start = INT_BUF_LEN;
        let mut rest = value;
        loop {
            start -= 1;
            // `rest % 10` is a single digit.
            digits[start] = b'0' + (rest % 10) as u8;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }
        for &digit in &digits[start..] {
            self.put_char(char::from(digit));
        }
    }

    /// Append a signed integer in decimal.
    fn put_int(&mut self, value: i64) {
        if value < 0 {
            self.put_char('-');
        }
        self.put_uint(value.unsigned_abs());
    }
}

impl TextSink for String {
    #[inline]
    fn put_char(&mut self, c: char) {
        self.push(c);
    }

    #[inline]
    fn put_str(&mut self, s: &str) {
        self.push_str(s);
    }
}
