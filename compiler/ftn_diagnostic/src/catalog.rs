//! Message translation.
//!
//! Every template passed to a report is a message id. Before formatting,
//! the context asks its catalog for a translation. Translations reorder
//! arguments with positional specifiers (`%2$s`) rather than changing the
//! argument list, so a translated template must type its slots exactly as
//! the untranslated template does.

use rustc_hash::FxHashMap;

/// Source of translated message templates.
pub trait MessageCatalog {
    /// Translation for `msgid`, or `None` to print the id as is.
    fn lookup(&self, msgid: &str) -> Option<&str>;

    /// The template to format for `msgid`.
    fn translate<'a>(&'a self, msgid: &'a str) -> &'a str {
        self.lookup(msgid).unwrap_or(msgid)
    }
}

/// Catalog that never translates.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdentityCatalog;

impl MessageCatalog for IdentityCatalog {
    #[inline]
    fn lookup(&self, _msgid: &str) -> Option<&str> {
        None
    }
}

/// In-memory translation table keyed by message id.
pub type TranslationTable = FxHashMap<String, String>;

impl MessageCatalog for TranslationTable {
    fn lookup(&self, msgid: &str) -> Option<&str> {
        self.get(msgid).map(String::as_str)
    }
}

#[cfg(test)]
mod tests;
