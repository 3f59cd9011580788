//! Tests for the two-pass message formatter.

#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use ftn_ir::{SourceFile, SourceLine};
use pretty_assertions::assert_eq;

fn locus_at(offset: usize) -> Locus {
    let file = SourceFile::root("t.f90");
    let line = SourceLine::new(&file, 1, "      x = y + z");
    Locus::new(&line, offset)
}

// Pass 1

#[test]
fn implicit_slots_follow_template_order() {
    let spec = FormatSpec::parse("%s has %d of %u").unwrap();
    assert_eq!(spec.slot_count(), 3);
    assert_eq!(spec.slot_type(0), Some(ArgType::Str));
    assert_eq!(spec.slot_type(1), Some(ArgType::Int));
    assert_eq!(spec.slot_type(2), Some(ArgType::UInt));
}

#[test]
fn long_conversions() {
    let spec = FormatSpec::parse("%ld %li %lu").unwrap();
    assert_eq!(spec.slot_type(0), Some(ArgType::Long));
    assert_eq!(spec.slot_type(1), Some(ArgType::Long));
    assert_eq!(spec.slot_type(2), Some(ArgType::ULong));
}

#[test]
fn percent_escape_takes_no_slot() {
    let spec = FormatSpec::parse("100%% of %s").unwrap();
    assert_eq!(spec.slot_count(), 1);
}

#[test]
fn implicit_slot_continues_after_positional() {
    let spec = FormatSpec::parse("%2$s then %d").unwrap();
    assert_eq!(spec.slot_type(0), None);
    assert_eq!(spec.slot_type(1), Some(ArgType::Str));
    assert_eq!(spec.slot_type(2), Some(ArgType::Int));
}

#[test]
fn rejects_malformed_templates() {
    assert_eq!(FormatSpec::parse("50%"), Err(FormatError::DanglingPercent));
    assert_eq!(FormatSpec::parse("%1s"), Err(FormatError::MissingDollar));
    assert_eq!(FormatSpec::parse("%0$s"), Err(FormatError::ZeroPosition));
    assert_eq!(
        FormatSpec::parse("%f"),
        Err(FormatError::UnknownConversion("f".to_string()))
    );
    assert_eq!(
        FormatSpec::parse("%lx"),
        Err(FormatError::UnknownConversion("lx".to_string()))
    );
    assert_eq!(
        FormatSpec::parse("%11$d"),
        Err(FormatError::TooManySlots { position: 11 })
    );
}

#[test]
fn ten_slots_is_the_limit() {
    assert!(FormatSpec::parse("%d%d%d%d%d%d%d%d%d%d").is_ok());
    assert_eq!(
        FormatSpec::parse("%d%d%d%d%d%d%d%d%d%d%d"),
        Err(FormatError::TooManySlots { position: 11 })
    );
}

#[test]
fn rejects_conflicting_slot_types() {
    assert_eq!(
        FormatSpec::parse("%1$s %1$d"),
        Err(FormatError::ConflictingTypes {
            position: 1,
            first: ArgType::Str,
            second: ArgType::Int,
        })
    );
    assert!(FormatSpec::parse("%1$s and again %1$s").is_ok());
}

// Resolution and pass 2

#[test]
fn substitutes_in_template_order() {
    let text = format_message(
        "'%s' at %d, %u, %ld, %lu, %c",
        &[
            Arg::Str("x"),
            Arg::Int(-3),
            Arg::UInt(4),
            Arg::Long(-5_000_000_000),
            Arg::ULong(6),
            Arg::Char('q'),
        ],
        None,
    )
    .unwrap();
    assert_eq!(text, "'x' at -3, 4, -5000000000, 6, q");
}

#[test]
fn positional_arguments_reorder() {
    let text = format_message(
        "%2$s before %1$s, %2$s again",
        &[Arg::Str("first"), Arg::Str("second")],
        None,
    )
    .unwrap();
    assert_eq!(text, "second before first, second again");
}

#[test]
fn percent_escape_prints_percent() {
    let text = format_message("%d%% done", &[Arg::Int(50)], None).unwrap();
    assert_eq!(text, "50% done");
}

#[test]
fn loci_become_numbered_references() {
    let a = locus_at(6);
    let b = locus_at(10);
    let text = format_message(
        "'%s' at %L conflicts with %L",
        &[Arg::Str("x"), Arg::Locus(&a), Arg::Locus(&b)],
        None,
    )
    .unwrap();
    assert_eq!(text, "'x' at (1) conflicts with (2)");
}

#[test]
fn current_locus_consumes_no_argument() {
    let here = locus_at(6);
    let spec = FormatSpec::parse("Unexpected '%s' at %C").unwrap();
    let resolved = spec.resolve(&[Arg::Str(")")], Some(&here)).unwrap();

    let mut text = String::new();
    resolved.emit(&mut text);
    assert_eq!(text, "Unexpected ')' at (1)");
    assert_eq!(resolved.first_locus(), Some(&here));
    assert_eq!(resolved.second_locus(), None);
}

#[test]
fn locus_numbering_follows_slot_order() {
    let a = locus_at(2);
    let b = locus_at(9);
    let spec = FormatSpec::parse("%2$L is shadowed by %1$L").unwrap();
    let resolved = spec
        .resolve(&[Arg::Locus(&a), Arg::Locus(&b)], None)
        .unwrap();

    let mut text = String::new();
    resolved.emit(&mut text);
    assert_eq!(text, "(2) is shadowed by (1)");
    assert_eq!(resolved.first_locus(), Some(&a));
    assert_eq!(resolved.second_locus(), Some(&b));
}

#[test]
fn missing_current_locus_still_counts_as_locus() {
    let spec = FormatSpec::parse("at %C").unwrap();
    let resolved = spec.resolve(&[], None).unwrap();
    assert!(resolved.has_loci());
    assert_eq!(resolved.first_locus(), None);
}

#[test]
fn rejects_third_locus() {
    let a = locus_at(1);
    let spec = FormatSpec::parse("%L %L %C").unwrap();
    let err = spec
        .resolve(&[Arg::Locus(&a), Arg::Locus(&a)], Some(&a))
        .unwrap_err();
    assert_eq!(err, FormatError::TooManyLoci);
}

#[test]
fn rejects_type_mismatch() {
    let err = format_message("%d", &[Arg::Str("x")], None).unwrap_err();
    assert_eq!(
        err,
        FormatError::TypeMismatch {
            position: 1,
            expected: ArgType::Int,
            found: ArgType::Str,
        }
    );
    // Widths are part of the type.
    assert!(format_message("%ld", &[Arg::Int(1)], None).is_err());
}

#[test]
fn rejects_wrong_argument_count() {
    assert_eq!(
        format_message("%s %s", &[Arg::Str("x")], None),
        Err(FormatError::ArgumentCount {
            expected: 2,
            found: 1,
        })
    );
    assert_eq!(
        format_message("%s", &[Arg::Str("x"), Arg::Int(1)], None),
        Err(FormatError::ArgumentCount {
            expected: 1,
            found: 2,
        })
    );
}

#[test]
fn rejects_unreferenced_slot() {
    assert_eq!(
        format_message("%2$s", &[Arg::Int(1), Arg::Str("x")], None),
        Err(FormatError::UnreferencedSlot { position: 1 })
    );
}

#[test]
fn print_appends_label_and_newline() {
    let spec = FormatSpec::parse("Symbol '%s' is unused").unwrap();
    let resolved = spec.resolve(&[Arg::Str("k")], None).unwrap();
    let mut out = String::new();
    resolved.print(&mut out, "Warning:", 80).unwrap();
    assert_eq!(out, "Warning: Symbol 'k' is unused\n");
}

#[test]
fn arg_conversions() {
    let name = String::from("n");
    assert_eq!(Arg::from('c').arg_type(), ArgType::Char);
    assert_eq!(Arg::from("s").arg_type(), ArgType::Str);
    assert_eq!(Arg::from(&name).arg_type(), ArgType::Str);
    assert_eq!(Arg::from(1i32).arg_type(), ArgType::Int);
    assert_eq!(Arg::from(1u32).arg_type(), ArgType::UInt);
    assert_eq!(Arg::from(1i64).arg_type(), ArgType::Long);
    assert_eq!(Arg::from(1u64).arg_type(), ArgType::ULong);
    assert_eq!(Arg::from(&locus_at(0)).arg_type(), ArgType::Locus);
}

#[test]
fn errors_display_the_broken_contract() {
    let err = FormatError::TypeMismatch {
        position: 2,
        expected: ArgType::ULong,
        found: ArgType::Int,
    };
    assert_eq!(err.to_string(), "argument 2 expects %lu, found %d");
}
