//! Input-boundary types shared between the Fortran front-end and its
//! diagnostics.
//!
//! The lexer owns a pool of [`SourceLine`]s; diagnostics only ever hold
//! [`Locus`] handles into that pool. Each line knows its [`SourceFile`], and
//! each file knows which file included it, so an error inside an `INCLUDE`d
//! file can be reported together with its inclusion stack.

mod source;
mod std_flags;

pub use source::{IncludeChain, Locus, SourceFile, SourceLine};
pub use std_flags::StdFlags;
