#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn registry_round_trips_every_identifier() {
    for (id, kind) in REGISTRY {
        assert_eq!(lookup_piece(id), Some(*kind));
        assert_eq!(kind.id(), *id);
    }
    assert_eq!(lookup_piece("trick_teleport"), None);
}

#[test]
fn params_never_exceed_max() {
    for (_, kind) in REGISTRY {
        assert!(kind.params().len() <= MAX_PARAMS, "{kind} has too many params");
    }
}

#[test]
fn action_categories() {
    assert!(PieceKind::Ignite.category().is_action());
    assert!(PieceKind::Repeat.category().is_action());
    assert!(!PieceKind::Sum.category().is_action());
    assert!(!PieceKind::ErrorSuppressor.category().is_action());
}

#[test]
fn literal_equality_is_bitwise_and_normalises_negative_zero() {
    assert_eq!(Literal::new(-0.0), Literal::new(0.0));
    assert_eq!(Literal::new(2.5), Literal::new(2.5));
    assert_ne!(Literal::new(2.5), Literal::new(2.25));
    assert_eq!(Literal::new(f64::NAN), Literal::new(f64::NAN));
}

#[test]
fn new_piece_starts_disconnected() {
    let piece = Piece::new(PieceKind::AddMotion);
    let sides: Vec<Side> = piece.slots().map(|(_, side)| side).collect();
    assert_eq!(sides, vec![Side::Off, Side::Off, Side::Off]);
}

#[test]
fn set_param_binds_named_slot() {
    let piece = Piece::new(PieceKind::Ignite)
        .with_param(param::TARGET, Side::Left)
        .unwrap()
        .with_param(param::TIME, Side::Top)
        .unwrap();
    assert_eq!(piece.side(0), Some(Side::Left));
    assert_eq!(piece.side(1), Some(Side::Top));
    assert_eq!(piece.side(2), None);
}

#[test]
fn set_param_rejects_unknown_name() {
    let err = Piece::new(PieceKind::Caster)
        .with_param(param::TARGET, Side::Left)
        .unwrap_err();
    assert_eq!(err.kind, "selector_caster");
    assert_eq!(err.to_string(), "`selector_caster` has no parameter named `target`");
}

#[test]
fn outputs_match_slot_types() {
    assert_eq!(PieceKind::Caster.output(), Output::Value(ValueType::Entity));
    assert_eq!(PieceKind::EntityPosition.output(), Output::Value(ValueType::Vector));
    assert_eq!(PieceKind::Connector.output(), Output::Forward);
    assert_eq!(PieceKind::Ignite.output(), Output::Nothing);
    assert!(ParamType::Any.accepts(ValueType::Entity));
    assert!(!ParamType::Number.accepts(ValueType::Vector));
    assert!(!ParamType::Action.accepts(ValueType::Number));
}
