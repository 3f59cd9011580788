//! Source excerpts.
//!
//! A diagnostic with loci is preceded by the offending source line and a
//! marker row pointing at the columns:
//!
//! ```text
//! prog.f90:12.10-17:
//!     Included at main.f90:3:
//!
//!       x = foo(1) + bar
//!           1      2
//! Error: ...
//! ```
//!
//! Columns are raw character offsets into the line. Lines wider than the
//! terminal are scrolled horizontally so the rightmost marker stays in view.

use ftn_ir::Locus;

use crate::codec::{display_len, display_width, render_char};
use crate::emitter::TextSink;
use crate::format::{self, Arg, FormatError};

/// Columns kept free to the right of the rightmost marker when scrolling.
const SCROLL_MARGIN: usize = 5;

/// Two markers further apart than `width - SPLIT_MARGIN` get separate
/// excerpts. Kept above `SCROLL_MARGIN` so scrolling never hides a marker
/// of a shared excerpt.
const SPLIT_MARGIN: usize = 10;

/// Draw the excerpt for the loci of one message.
///
/// Two loci on the same line share one excerpt when both markers fit in
/// the window; otherwise each locus gets its own.
pub fn show_loci<S: TextSink + ?Sized>(
    sink: &mut S,
    first: Option<&Locus>,
    second: Option<&Locus>,
    width: usize,
) -> Result<(), FormatError> {
    let Some(first) = first else {
        return format::print_line(sink, "<During initialization>\n", &[], width);
    };
    let c1 = first.offset();
    let Some(second) = second else {
        return show_locus(sink, first, Some(c1), None, width);
    };
    let c2 = second.offset();

    let distance = c1.abs_diff(c2);
    let too_far = width
        .checked_sub(SPLIT_MARGIN)
        .map_or(true, |limit| distance > limit);
    if !first.same_line(second) || too_far {
        show_locus(sink, first, Some(c1), None, width)?;
        return show_locus(sink, second, None, Some(c2), width);
    }
    show_locus(sink, first, Some(c1), Some(c2), width)
}

/// Draw one excerpt with marker `1` at `c1` and marker `2` at `c2`.
fn show_locus<S: TextSink + ?Sized>(
    sink: &mut S,
    locus: &Locus,
    c1: Option<usize>,
    mut c2: Option<usize>,
    width: usize,
) -> Result<(), FormatError> {
    let line = locus.line();
    let file = line.file();

    sink.put_str(file.name());
    sink.put_char(':');
    sink.put_uint(line.number().into());
    let shown1 = c1.filter(|&c| c > 0);
    let shown2 = c2.filter(|&c| c > 0);
    if shown1.is_some() || shown2.is_some() {
        sink.put_char('.');
    }
    if let Some(c) = shown1 {
        sink.put_uint(c as u64);
    }
    if shown1.is_some() && shown2.is_some() {
        sink.put_char('-');
    }
    if let Some(c) = shown2 {
        sink.put_uint(c as u64);
    }
    sink.put_str(":\n");

    for (parent, included_at) in file.include_chain() {
        format::print_line(
            sink,
            "    Included at %s:%u:",
            &[Arg::Str(parent.name()), Arg::UInt(included_at)],
            width,
        )?;
    }
    sink.put_char('\n');

    // Both markers on one column print as "12".
    if c1.is_some() && c1 == c2 {
        c2 = c2.map(|c| c + 1);
    }

    let cmax = c1.max(c2).unwrap_or(0);
    let offset = cmax.saturating_add(SCROLL_MARGIN).saturating_sub(width);
    let visible = line.chars().get(offset..).unwrap_or(&[]);

    let mut budget = display_len(visible);
    if budget > width {
        budget = width.saturating_sub(1);
    }
    for &c in visible {
        if budget == 0 {
            break;
        }
        let text = render_char(c);
        text.write_to(sink);
        budget = budget.saturating_sub(text.width());
    }
    sink.put_char('\n');

    let c1 = c1.and_then(|c| c.checked_sub(offset));
    let c2 = c2.and_then(|c| c.checked_sub(offset));
    let cmax = cmax.saturating_sub(offset);
    for column in 0..cmax {
        // Past the end of the line each column is one blank.
        let mut spaces = visible.get(column).map_or(1, |&c| display_width(c));
        if c1 == Some(column) {
            sink.put_char('1');
            spaces -= 1;
        } else if c2 == Some(column) {
            sink.put_char('2');
            spaces -= 1;
        }
        for _ in 0..spaces {
            sink.put_char(' ');
        }
    }
    if c1 == Some(cmax) {
        sink.put_char('1');
    } else if c2 == Some(cmax) {
        sink.put_char('2');
    }
    sink.put_char('\n');

    Ok(())
}
