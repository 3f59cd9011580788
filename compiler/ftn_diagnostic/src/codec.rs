//! Printable representation of source characters.
//!
//! Source lines are echoed back in diagnostics. Printable ASCII is shown as
//! is, a tab becomes a single space, and everything else is escaped as
//! `\xNN`, `\uNNNN` or `\UNNNNNNNN` depending on its magnitude. The width
//! of the escaped text is what the marker row has to account for.

use std::fmt::{self, Write as _};

use crate::emitter::TextSink;

const XDIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

/// Printable ASCII, excluding control characters and DEL.
#[inline]
pub fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

/// Number of display columns `c` occupies once rendered.
#[inline]
pub fn display_width(c: char) -> usize {
    render_char(c).width()
}

/// Total display width of a character sequence.
pub fn display_len(chars: &[char]) -> usize {
    chars.iter().map(|&c| display_width(c)).sum()
}

/// Rendered form of one source character.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WideCharText {
    /// Shown as a single character.
    Plain(char),
    /// Shown as `\` + `marker` + `digits` uppercase hex digits of `code`.
    Escaped { marker: char, code: u32, digits: u32 },
}

impl WideCharText {
    /// Display width, always equal to the rendered length.
    pub fn width(self) -> usize {
        match self {
            WideCharText::Plain(_) => 1,
            WideCharText::Escaped { digits, .. } => 2 + digits as usize,
        }
    }

    fn for_each_char(self, mut f: impl FnMut(char)) {
        match self {
            WideCharText::Plain(c) => f(c),
            WideCharText::Escaped {
                marker,
                code,
                digits,
            } => {
                f('\\');
                f(marker);
                for shift in (0..digits).rev() {
                    f(XDIGITS[((code >> (4 * shift)) & 0xF) as usize]);
                }
            }
        }
    }

    /// Write the rendered text to a sink.
    pub fn write_to<S: TextSink + ?Sized>(self, sink: &mut S) {
        self.for_each_char(|c| sink.put_char(c));
    }
}

impl fmt::Display for WideCharText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        self.for_each_char(|c| {
            if result.is_ok() {
                result = f.write_char(c);
            }
        });
        result
    }
}

/// Render one character the way source excerpts show it.
pub fn render_char(c: char) -> WideCharText {
    if c == '\t' {
        return WideCharText::Plain(' ');
    }
    if is_printable(c) {
        return WideCharText::Plain(c);
    }
    let code = u32::from(c);
    let (marker, digits) = if code < 1 << 8 {
        ('x', 2)
    } else if code < 1 << 16 {
        ('u', 4)
    } else {
        ('U', 8)
    };
    WideCharText::Escaped {
        marker,
        code,
        digits,
    }
}

/// Printable text for a single character, e.g. for `%s` arguments that
/// quote a character literal.
pub fn print_wide_char(c: char) -> String {
    render_char(c).to_string()
}
