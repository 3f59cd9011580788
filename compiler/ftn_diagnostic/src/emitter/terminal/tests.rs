use super::*;
use pretty_assertions::assert_eq;

#[test]
fn writes_only_complete_lines() {
    let mut sink = TerminalSink::new(Vec::new());

    sink.put_str("prog.f90:3.1:");
    assert!(sink.writer().is_empty());
    assert_eq!(sink.pending_line(), "prog.f90:3.1:");

    sink.put_char('\n');
    assert_eq!(sink.writer().as_slice(), b"prog.f90:3.1:\n");
    assert_eq!(sink.pending_line(), "");
}

#[test]
fn flush_writes_partial_line() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.put_str("no newline");
    sink.flush();
    assert_eq!(sink.writer().as_slice(), b"no newline");
}

#[test]
fn write_raw_keeps_order_with_pending_text() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.put_str("partial ");
    sink.write_raw("Error: buffered\n");
    assert_eq!(
        String::from_utf8_lossy(sink.writer()),
        "partial Error: buffered\n"
    );
}

#[test]
fn integers_reach_the_writer() {
    let mut sink = TerminalSink::new(Vec::new());
    sink.put_int(-12);
    sink.put_char(' ');
    sink.put_uint(340);
    sink.put_char('\n');
    assert_eq!(sink.writer().as_slice(), b"-12 340\n");
}

// ColorMode tests

#[test]
fn color_mode_auto_with_tty() {
    assert!(ColorMode::Auto.should_use_colors(true));
}

#[test]
fn color_mode_auto_without_tty() {
    assert!(!ColorMode::Auto.should_use_colors(false));
}

#[test]
fn color_mode_always_and_never_ignore_tty() {
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn color_mode_default_is_auto() {
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}

#[test]
fn paint_without_colors_is_plain() {
    assert_eq!(paint("Error:", Severity::Error, false), "Error:");
}

#[test]
fn paint_with_colors_wraps_label() {
    let painted = paint("Warning:", Severity::Warning, true);
    assert!(painted.starts_with("\x1b["));
    assert!(painted.contains("Warning:"));
    assert!(painted.ends_with("\x1b[0m"));
}
