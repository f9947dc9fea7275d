#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn codes_are_in_the_compile_range() {
    let kinds = [
        CompileErrorKind::NoTricks,
        CompileErrorKind::InfiniteLoop,
        CompileErrorKind::NonPositiveInteger { param: "time" },
        CompileErrorKind::RepeatLimit { count: 9, limit: 8 },
    ];
    for kind in kinds {
        assert!(kind.code().is_compile_error(), "{kind:?}");
    }
}

#[test]
fn display_omits_location() {
    let err = CompileError::at(
        CompileErrorKind::NonPositiveInteger { param: "time" },
        Coord::new(2, 0).unwrap(),
        PieceKind::Ignite,
    );
    assert_eq!(err.to_string(), "`time` must be a positive integer");
}

#[test]
fn diagnostic_carries_code_location_and_piece() {
    let at = Coord::new(2, 0).unwrap();
    let diag = CompileError::at(
        CompileErrorKind::NonPositiveInteger { param: "time" },
        at,
        PieceKind::Ignite,
    )
    .to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E0007);
    assert_eq!(diag.location, Some(at));
    assert_eq!(diag.piece, Some("trick_ignite"));
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn diagnostic_without_location() {
    let diag = CompileError::new(CompileErrorKind::NoTricks).to_diagnostic();
    assert_eq!(diag.location, None);
    assert_eq!(diag.piece, None);
    assert_eq!(diag.message, "spell has no tricks");
}
