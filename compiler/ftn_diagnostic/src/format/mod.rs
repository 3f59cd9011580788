//! Message templates.
//!
//! Templates use a small printf dialect:
//!
//! | specifier | argument |
//! |-----------|----------|
//! | `%c` | [`Arg::Char`] |
//! | `%d`, `%i` | [`Arg::Int`] |
//! | `%u` | [`Arg::UInt`] |
//! | `%ld`, `%li` | [`Arg::Long`] |
//! | `%lu` | [`Arg::ULong`] |
//! | `%s` | [`Arg::Str`] |
//! | `%L` | [`Arg::Locus`] |
//! | `%C` | none, uses the current locus |
//! | `%%` | none, a literal `%` |
//!
//! Any specifier may carry a 1-based position, `%2$s`, to consume arguments
//! out of template order.
//!
//! Loci are not printed inline. The first locus becomes `(1)` and the second
//! `(2)` in the message, and both are drawn as a source excerpt above it. So
//! the template is walked twice: once to type the argument slots and find
//! the loci, and once to print the text after the excerpt is out.

use std::fmt;

use ftn_ir::Locus;
use thiserror::Error;

use crate::emitter::TextSink;
use crate::locus;

/// Maximum number of argument slots in one template.
pub const MAX_ARGS: usize = 10;

/// Maximum number of loci in one message.
pub const MAX_LOCI: usize = 2;

/// Type of an argument slot, fixed by its conversion specifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgType {
    CurrentLocus,
    Locus,
    Int,
    UInt,
    Long,
    ULong,
    Char,
    Str,
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = match self {
            ArgType::CurrentLocus => "%C",
            ArgType::Locus => "%L",
            ArgType::Int => "%d",
            ArgType::UInt => "%u",
            ArgType::Long => "%ld",
            ArgType::ULong => "%lu",
            ArgType::Char => "%c",
            ArgType::Str => "%s",
        };
        f.write_str(spec)
    }
}

/// A typed message argument.
#[derive(Copy, Clone, Debug)]
pub enum Arg<'a> {
    Char(char),
    Str(&'a str),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Locus(&'a Locus),
}

impl Arg<'_> {
    /// The slot type this argument satisfies.
    pub fn arg_type(&self) -> ArgType {
        match self {
            Arg::Char(_) => ArgType::Char,
            Arg::Str(_) => ArgType::Str,
            Arg::Int(_) => ArgType::Int,
            Arg::UInt(_) => ArgType::UInt,
            Arg::Long(_) => ArgType::Long,
            Arg::ULong(_) => ArgType::ULong,
            Arg::Locus(_) => ArgType::Locus,
        }
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Str(value)
    }
}

impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Arg::Int(value)
    }
}

impl From<u32> for Arg<'_> {
    fn from(value: u32) -> Self {
        Arg::UInt(value)
    }
}

impl From<i64> for Arg<'_> {
    fn from(value: i64) -> Self {
        Arg::Long(value)
    }
}

impl From<u64> for Arg<'_> {
    fn from(value: u64) -> Self {
        Arg::ULong(value)
    }
}

impl<'a> From<&'a Locus> for Arg<'a> {
    fn from(value: &'a Locus) -> Self {
        Arg::Locus(value)
    }
}

/// A template or argument list that breaks the format contract.
///
/// These are bugs in the calling compiler code, never in the user's source.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format ends with a lone '%'")]
    DanglingPercent,
    #[error("positional specifier is missing its '$'")]
    MissingDollar,
    #[error("positional specifiers are 1-based, found '%0$'")]
    ZeroPosition,
    #[error("unknown conversion '%{0}'")]
    UnknownConversion(String),
    #[error("argument {position} exceeds the argument limit")]
    TooManySlots { position: usize },
    #[error("argument {position} is used as both {first} and {second}")]
    ConflictingTypes {
        position: usize,
        first: ArgType,
        second: ArgType,
    },
    #[error("argument {position} is never referenced by the format")]
    UnreferencedSlot { position: usize },
    #[error("argument {position} expects {expected}, found {found}")]
    TypeMismatch {
        position: usize,
        expected: ArgType,
        found: ArgType,
    },
    #[error("format consumes {expected} arguments, {found} given")]
    ArgumentCount { expected: usize, found: usize },
    #[error("more than two loci in one message")]
    TooManyLoci,
}

/// Result of the first pass over a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatSpec<'t> {
    template: &'t str,
    /// Type of each slot; `None` for positions no specifier names.
    slots: Vec<Option<ArgType>>,
    /// Slot consumed by each specifier, in template order.
    order: Vec<usize>,
}

impl<'t> FormatSpec<'t> {
    /// Scan a template and type its argument slots.
    pub fn parse(template: &'t str) -> Result<Self, FormatError> {
        let mut slots: Vec<Option<ArgType>> = Vec::new();
        let mut order = Vec::new();
        let mut last: Option<usize> = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                continue;
            }
            match chars.peek() {
                None => return Err(FormatError::DanglingPercent),
                Some('%') => {
                    chars.next();
                    continue;
                }
                Some(_) => {}
            }

            let slot = if chars.peek().is_some_and(char::is_ascii_digit) {
                let mut position: usize = 0;
                while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                    chars.next();
                    position = position.saturating_mul(10).saturating_add(digit as usize);
                }
                if chars.next() != Some('$') {
                    return Err(FormatError::MissingDollar);
                }
                position.checked_sub(1).ok_or(FormatError::ZeroPosition)?
            } else {
                last.map_or(0, |slot| slot + 1)
            };
            if slot >= MAX_ARGS {
                return Err(FormatError::TooManySlots { position: slot + 1 });
            }
            last = Some(slot);

            let ty = match chars.next() {
                Some('C') => ArgType::CurrentLocus,
                Some('L') => ArgType::Locus,
                Some('d' | 'i') => ArgType::Int,
                Some('u') => ArgType::UInt,
                Some('l') => match chars.next() {
                    Some('u') => ArgType::ULong,
                    Some('d' | 'i') => ArgType::Long,
                    Some(other) => return Err(FormatError::UnknownConversion(format!("l{other}"))),
                    None => return Err(FormatError::UnknownConversion("l".to_string())),
                },
                Some('c') => ArgType::Char,
                Some('s') => ArgType::Str,
                Some(other) => return Err(FormatError::UnknownConversion(other.to_string())),
                None => return Err(FormatError::DanglingPercent),
            };

            if slots.len() <= slot {
                slots.resize(slot + 1, None);
            }
            match slots[slot] {
                Some(first) if first != ty => {
                    return Err(FormatError::ConflictingTypes {
                        position: slot + 1,
                        first,
                        second: ty,
                    });
                }
                _ => slots[slot] = Some(ty),
            }
            order.push(slot);
        }

        Ok(FormatSpec {
            template,
            slots,
            order,
        })
    }

    /// Number of argument slots, including any unreferenced gaps.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Type of a slot (0-based), if any specifier names it.
    pub fn slot_type(&self, slot: usize) -> Option<ArgType> {
        self.slots.get(slot).copied().flatten()
    }

    /// Bind arguments to slots.
    ///
    /// Arguments are consumed in call order, one per slot in slot order.
    /// `%C` slots consume nothing and take `current` instead. Locus slots
    /// are numbered `(1)` and `(2)` in slot order.
    pub fn resolve<'a>(
        &self,
        args: &[Arg<'a>],
        current: Option<&Locus>,
    ) -> Result<Resolved<'_, 'a>, FormatError> {
        let expected = self
            .slots
            .iter()
            .filter(|ty| !matches!(ty, Some(ArgType::CurrentLocus)))
            .count();
        let mut values = Vec::with_capacity(self.slots.len());
        let mut loci: Vec<Option<Locus>> = Vec::new();
        let mut remaining = args.iter();

        for (index, &ty) in self.slots.iter().enumerate() {
            let position = index + 1;
            let ty = ty.ok_or(FormatError::UnreferencedSlot { position })?;

            if ty == ArgType::CurrentLocus {
                values.push(SlotValue::Locus(push_locus(&mut loci, current.cloned())?));
                continue;
            }

            let arg = *remaining.next().ok_or(FormatError::ArgumentCount {
                expected,
                found: args.len(),
            })?;
            if arg.arg_type() != ty {
                return Err(FormatError::TypeMismatch {
                    position,
                    expected: ty,
                    found: arg.arg_type(),
                });
            }
            let value = match arg {
                Arg::Locus(locus) => SlotValue::Locus(push_locus(&mut loci, Some(locus.clone()))?),
                other => SlotValue::Arg(other),
            };
            values.push(value);
        }

        if args.len() != expected {
            return Err(FormatError::ArgumentCount {
                expected,
                found: args.len(),
            });
        }

        Ok(Resolved {
            spec: self,
            values,
            loci,
        })
    }
}

fn push_locus(loci: &mut Vec<Option<Locus>>, locus: Option<Locus>) -> Result<u8, FormatError> {
    if loci.len() == MAX_LOCI {
        return Err(FormatError::TooManyLoci);
    }
    loci.push(locus);
    // At most MAX_LOCI entries.
    Ok(loci.len() as u8)
}

#[derive(Copy, Clone, Debug)]
enum SlotValue<'a> {
    Arg(Arg<'a>),
    /// Locus number, 1 or 2.
    Locus(u8),
}

/// A template with every slot bound, ready to print.
#[derive(Debug)]
pub struct Resolved<'s, 'a> {
    spec: &'s FormatSpec<'s>,
    values: Vec<SlotValue<'a>>,
    /// Locus slots in slot order. `None` when `%C` had no current locus.
    loci: Vec<Option<Locus>>,
}

impl Resolved<'_, '_> {
    /// Whether the message references any locus.
    pub fn has_loci(&self) -> bool {
        !self.loci.is_empty()
    }

    /// The locus printed as `(1)`.
    pub fn first_locus(&self) -> Option<&Locus> {
        self.loci.first().and_then(Option::as_ref)
    }

    /// The locus printed as `(2)`.
    pub fn second_locus(&self) -> Option<&Locus> {
        self.loci.get(1).and_then(Option::as_ref)
    }

    /// Second pass: print the message text in template order.
    pub fn emit<S: TextSink + ?Sized>(&self, sink: &mut S) {
        let mut specifiers = self.spec.order.iter();
        let mut chars = self.spec.template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                sink.put_char(c);
                continue;
            }
            while chars.next_if(char::is_ascii_digit).is_some() {}
            let _ = chars.next_if_eq(&'$');

            match chars.next() {
                Some('%') => sink.put_char('%'),
                Some(conversion) => {
                    if conversion == 'l' {
                        chars.next();
                    }
                    if let Some(&slot) = specifiers.next() {
                        self.emit_slot(sink, slot);
                    }
                }
                None => {}
            }
        }
    }

    fn emit_slot<S: TextSink + ?Sized>(&self, sink: &mut S, slot: usize) {
        match self.values[slot] {
            SlotValue::Arg(Arg::Char(c)) => sink.put_char(c),
            SlotValue::Arg(Arg::Str(s)) => sink.put_str(s),
            SlotValue::Arg(Arg::Int(n)) => sink.put_int(n.into()),
            SlotValue::Arg(Arg::UInt(n)) => sink.put_uint(n.into()),
            SlotValue::Arg(Arg::Long(n)) => sink.put_int(n),
            SlotValue::Arg(Arg::ULong(n)) => sink.put_uint(n),
            // Rebound to `SlotValue::Locus` during resolution.
            SlotValue::Arg(Arg::Locus(_)) => {}
            SlotValue::Locus(number) => {
                sink.put_char('(');
                sink.put_uint(number.into());
                sink.put_char(')');
            }
        }
    }

    /// Print a full diagnostic: the source excerpt for the loci, then
    /// `label` and the message text on one line.
    pub fn print<S: TextSink + ?Sized>(
        &self,
        sink: &mut S,
        label: &str,
        width: usize,
    ) -> Result<(), FormatError> {
        if self.has_loci() {
            locus::show_loci(sink, self.first_locus(), self.second_locus(), width)?;
        }
        if !label.is_empty() {
            sink.put_str(label);
            sink.put_char(' ');
        }
        self.emit(sink);
        sink.put_char('\n');
        Ok(())
    }
}

/// Print an unlabeled message line. Used for the inclusion stack and the
/// initialization placeholder, which never carry loci.
pub(crate) fn print_line<S: TextSink + ?Sized>(
    sink: &mut S,
    template: &str,
    args: &[Arg<'_>],
    width: usize,
) -> Result<(), FormatError> {
    let spec = FormatSpec::parse(template)?;
    spec.resolve(args, None)?.print(sink, "", width)
}

/// Render only the message text, with loci shown as `(1)`/`(2)`.
pub fn format_message(
    template: &str,
    args: &[Arg<'_>],
    current: Option<&Locus>,
) -> Result<String, FormatError> {
    let spec = FormatSpec::parse(template)?;
    let resolved = spec.resolve(args, current)?;
    let mut text = String::with_capacity(template.len());
    resolved.emit(&mut text);
    Ok(text)
}

#[cfg(test)]
mod tests;
