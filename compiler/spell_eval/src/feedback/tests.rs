#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use super::*;
use crate::errors::RuntimeErrorKind;
use pretty_assertions::assert_eq;
use spell_ir::{Coord, PieceKind};

#[test]
fn buffer_captures_debug_lines() {
    let handler = buffer_feedback();
    handler.debug(EntityRef(1), "3");
    handler.debug(EntityRef(1), "[0, 1, 0]");
    assert_eq!(handler.get_output(), "entity#1: 3\nentity#1: [0, 1, 0]\n");
}

#[test]
fn buffer_captures_errors_with_location() {
    let handler = buffer_feedback();
    let err = RuntimeError::new(RuntimeErrorKind::NullTarget)
        .in_piece(Coord::new(3, 2).unwrap(), PieceKind::Ignite);
    handler.report_error(EntityRef(7), &err);
    assert_eq!(
        handler.get_output(),
        "entity#7: error[E1001]: null target at (3, 2)\n"
    );
}

#[test]
fn clear_empties_buffer() {
    let handler = buffer_feedback();
    handler.debug(EntityRef(1), "hello");
    handler.clear();
    assert!(handler.get_output().is_empty());
}

#[test]
fn non_capturing_handlers_return_nothing() {
    for handler in [log_feedback(), silent_feedback()] {
        handler.debug(EntityRef(1), "hello");
        assert_eq!(handler.get_output(), "");
    }
}
