#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use spell_ir::Coord;

fn render(diags: &[Diagnostic]) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_all(diags).unwrap();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_plain_output() {
    let diag = Diagnostic::error(ErrorCode::E0002)
        .with_message("parameter `time` is not connected")
        .at(Coord::new(1, 2).unwrap())
        .with_piece("trick_ignite");

    assert_eq!(
        render(&[diag]),
        "error[E0002]: parameter `time` is not connected\n\
         \x20 --> trick_ignite at (1, 2)\n\
         \n\
         error: spell failed with 1 error\n"
    );
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_colored_output_contains_escape_codes() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter
        .emit(&Diagnostic::error(ErrorCode::E1001).with_message("null target"))
        .unwrap();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.contains("\x1b[1;31m"));
    assert!(out.contains("null target"));
}

#[test]
fn test_warnings_do_not_count_as_errors() {
    let out = render(&[Diagnostic::warning(ErrorCode::W0001).with_message("unused piece")]);
    assert!(!out.contains("spell failed"));
}
