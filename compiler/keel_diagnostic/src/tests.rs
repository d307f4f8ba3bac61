#![allow(clippy::unwrap_used, clippy::expect_used)]

use keel_ir::Position;
use pretty_assertions::assert_eq;

use super::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use super::*;

#[test]
fn error_code_display_and_phase() {
    assert_eq!(ErrorCode::E0001.to_string(), "E0001");
    assert_eq!(ErrorCode::E1005.phase(), Phase::Parse);
    assert_eq!(ErrorCode::E3002.phase(), Phase::Match);
    assert_eq!(ErrorCode::E6004.phase(), Phase::Runtime);
    assert!(ErrorCode::E9002.is_internal());
    assert!(!ErrorCode::E0004.is_internal());
}

#[test]
fn diagnostic_renders_code_message_and_position() {
    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message("unterminated string literal")
        .at(Position::new("main.kl".into(), 2, 7));

    assert!(diag.is_error());
    assert_eq!(
        diag.to_string(),
        "error[E0001]: unterminated string literal\n  --> main.kl:2:7"
    );
}

#[test]
fn internal_diagnostics_carry_bug_note() {
    let diag = Diagnostic::error(ErrorCode::E9001).with_message("double unread");
    assert_eq!(diag.notes.len(), 1);
    assert!(diag.to_string().contains("= note: this is a bug"));
}

#[test]
fn terminal_emitter_quotes_source_line() {
    let source = "x = 1\ny = \"abc\n";
    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message("unterminated string literal")
        .at(Position::new("main.kl".into(), 2, 5));

    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_source(source);
    emitter.emit(&diag);
    emitter.flush();
    let out = String::from_utf8(emitter.into_inner()).unwrap();

    assert_eq!(
        out,
        "error[E0001]: unterminated string literal\n  --> main.kl:2:5\n  |\n2 | y = \"abc\n  |     ^\n"
    );
}

#[test]
fn color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}
