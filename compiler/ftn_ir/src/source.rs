//! Source files, line buffers and loci.
//!
//! Lines are stored as `char` sequences rather than UTF-8 text because a
//! locus is an index into the line's characters, and rendering needs
//! per-character display widths.

use std::fmt;
use std::rc::Rc;

/// A source file, possibly included from another file.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    /// The file containing the `INCLUDE` line, if any.
    parent: Option<Rc<SourceFile>>,
    /// Line number in `parent` where this file was included.
    inclusion_line: u32,
}

impl SourceFile {
    /// Create a top-level file.
    pub fn root(name: impl Into<String>) -> Rc<Self> {
        Rc::new(SourceFile {
            name: name.into(),
            parent: None,
            inclusion_line: 0,
        })
    }

    /// Create a file included from `parent` at `inclusion_line`.
    pub fn included(name: impl Into<String>, parent: &Rc<SourceFile>, inclusion_line: u32) -> Rc<Self> {
        Rc::new(SourceFile {
            name: name.into(),
            parent: Some(Rc::clone(parent)),
            inclusion_line,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<&Rc<SourceFile>> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn inclusion_line(&self) -> u32 {
        self.inclusion_line
    }

    /// Walk the inclusion stack outward, innermost first.
    ///
    /// Each item is an including file together with the line in that file
    /// where the inner file was included.
    pub fn include_chain(&self) -> IncludeChain<'_> {
        IncludeChain {
            current: Some(self),
        }
    }
}

/// Iterator over a file's inclusion stack. See [`SourceFile::include_chain`].
#[derive(Clone, Debug)]
pub struct IncludeChain<'a> {
    current: Option<&'a SourceFile>,
}

impl<'a> Iterator for IncludeChain<'a> {
    type Item = (&'a SourceFile, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let file = self.current.take()?;
        let parent = file.parent.as_deref()?;
        self.current = Some(parent);
        Some((parent, file.inclusion_line))
    }
}

/// One line of source text.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceLine {
    file: Rc<SourceFile>,
    /// 1-based line number within `file`.
    number: u32,
    /// Line content without the line terminator.
    chars: Vec<char>,
}

impl SourceLine {
    /// Create a line from text. A trailing `\n` or `\r\n` is dropped.
    pub fn new(file: &Rc<SourceFile>, number: u32, text: &str) -> Rc<Self> {
        let text = text
            .strip_suffix('\n')
            .map_or(text, |t| t.strip_suffix('\r').unwrap_or(t));
        Self::from_chars(file, number, text.chars().collect())
    }

    /// Create a line from already-decoded characters.
    pub fn from_chars(file: &Rc<SourceFile>, number: u32, chars: Vec<char>) -> Rc<Self> {
        Rc::new(SourceLine {
            file: Rc::clone(file),
            number,
            chars,
        })
    }

    #[inline]
    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

/// A position inside a [`SourceLine`].
///
/// The offset counts characters from the start of the line and may point
/// one past the last character (end of line).
#[derive(Clone, Debug)]
pub struct Locus {
    line: Rc<SourceLine>,
    offset: usize,
}

impl Locus {
    pub fn new(line: &Rc<SourceLine>, offset: usize) -> Self {
        Locus {
            line: Rc::clone(line),
            offset,
        }
    }

    #[inline]
    pub fn line(&self) -> &SourceLine {
        &self.line
    }

    /// Character offset into the line (0-based).
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Derived 1-based `(line, column)` pair.
    pub fn line_col(&self) -> (u32, usize) {
        (self.line.number, self.offset + 1)
    }

    /// Whether both loci point into the same line buffer.
    #[inline]
    pub fn same_line(&self, other: &Locus) -> bool {
        Rc::ptr_eq(&self.line, &other.line)
    }
}

impl PartialEq for Locus {
    fn eq(&self, other: &Self) -> bool {
        self.same_line(other) && self.offset == other.offset
    }
}

impl Eq for Locus {}

impl fmt::Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.line_col();
        write!(f, "{}:{line}:{column}", self.line.file.name)
    }
}

#[cfg(test)]
mod tests;
