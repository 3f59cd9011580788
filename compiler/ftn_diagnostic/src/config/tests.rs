use super::*;
use pretty_assertions::assert_eq;

#[test]
fn columns_must_be_a_positive_integer() {
    assert_eq!(parse_columns(Some("132")), 132);
    assert_eq!(parse_columns(Some(" 100 ")), 100);
    assert_eq!(parse_columns(Some("0")), DEFAULT_TERMINAL_WIDTH);
    assert_eq!(parse_columns(Some("-5")), DEFAULT_TERMINAL_WIDTH);
    assert_eq!(parse_columns(Some("wide")), DEFAULT_TERMINAL_WIDTH);
    assert_eq!(parse_columns(None), DEFAULT_TERMINAL_WIDTH);
}

#[test]
fn non_terminal_output_is_unbounded() {
    assert_eq!(TerminalWidth::Detect.resolve(false), UNBOUNDED_WIDTH);
    assert_eq!(TerminalWidth::Unbounded.resolve(true), UNBOUNDED_WIDTH);
    assert_eq!(UNBOUNDED_WIDTH, 2_147_483_647);
}

#[test]
fn fixed_width_ignores_terminal() {
    assert_eq!(TerminalWidth::Fixed(40).resolve(true), 40);
    assert_eq!(TerminalWidth::Fixed(40).resolve(false), 40);
}

#[test]
fn fatal_errors_policy() {
    let default = FatalErrorsPolicy::default();
    assert_eq!(default, FatalErrorsPolicy::NowAndFlush);
    assert!(default.applies_to(CommitPoint::Now));
    assert!(default.applies_to(CommitPoint::Flush));
    assert!(!default.applies_to(CommitPoint::Immediate));

    let now = FatalErrorsPolicy::NowOnly;
    assert!(now.applies_to(CommitPoint::Now));
    assert!(!now.applies_to(CommitPoint::Flush));

    let every = FatalErrorsPolicy::EveryCommitted;
    assert!(every.applies_to(CommitPoint::Immediate));
}

#[test]
fn defaults() {
    let config = DiagnosticConfig::default();
    assert_eq!(config.max_errors, 25);
    assert!(!config.inhibit_warnings);
    assert!(!config.warnings_are_errors);
    assert!(!config.fatal_errors);
    assert_eq!(config.warn_std, StdFlags::F95_DEL | StdFlags::LEGACY);
    assert_eq!(config.terminal_width, TerminalWidth::Detect);
}

#[test]
fn unlimited_config() {
    let config = DiagnosticConfig::unlimited();
    assert_eq!(config.max_errors, 0);
    assert_eq!(config.terminal_width, TerminalWidth::Fixed(80));
    assert_eq!(config.color, ColorMode::Never);
}

#[test]
fn named_warnings_follow_their_option() {
    let mut config = DiagnosticConfig::unlimited();
    config.disabled_warnings.insert("tabs".to_string());
    config.error_warnings.insert("surprising".to_string());

    assert!(config.warning_enabled(WarningOption::Always));
    assert!(config.warning_enabled(WarningOption::Named("surprising")));
    assert!(!config.warning_enabled(WarningOption::Named("tabs")));

    assert!(config.warning_is_error(WarningOption::Named("surprising")));
    assert!(!config.warning_is_error(WarningOption::Named("tabs")));
    assert!(!config.warning_is_error(WarningOption::Always));
}

#[test]
fn inhibit_and_werror_cover_every_option() {
    let config = DiagnosticConfig {
        inhibit_warnings: true,
        warnings_are_errors: true,
        ..DiagnosticConfig::unlimited()
    };
    assert!(!config.warning_enabled(WarningOption::Always));
    assert!(!config.warning_enabled(WarningOption::Named("surprising")));
    assert!(config.warning_is_error(WarningOption::Always));
    assert!(config.warning_is_error(WarningOption::Named("surprising")));
}
