#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use super::*;
use crate::piece::{param, PieceKind};
use pretty_assertions::assert_eq;

fn at(x: usize, y: usize) -> Coord {
    Coord::new(x, y).unwrap()
}

#[test]
fn set_get_remove() {
    let mut grid = SpellGrid::new();
    assert!(grid.is_empty());
    assert_eq!(grid.set(at(2, 3), Piece::new(PieceKind::Caster)), None);
    assert_eq!(grid.get(at(2, 3)).map(Piece::kind), Some(PieceKind::Caster));
    assert_eq!(grid.len(), 1);

    let previous = grid.set(at(2, 3), Piece::number(4.0));
    assert_eq!(previous.map(|p| p.kind()), Some(PieceKind::Caster));

    assert!(grid.remove(at(2, 3)).is_some());
    assert!(grid.get(at(2, 3)).is_none());
}

#[test]
fn pieces_enumerate_in_reading_order() {
    let grid = SpellGrid::new()
        .with(at(5, 1), Piece::new(PieceKind::Caster))
        .with(at(0, 2), Piece::new(PieceKind::FocalPoint))
        .with(at(8, 0), Piece::new(PieceKind::LoopIndex));
    let coords: Vec<Coord> = grid.pieces().map(|(c, _)| c).collect();
    assert_eq!(coords, vec![at(8, 0), at(5, 1), at(0, 2)]);
}

#[test]
fn source_of_follows_bound_side() {
    let ignite = Piece::new(PieceKind::Ignite)
        .with_param(param::TARGET, Side::Left)
        .unwrap();
    let grid = SpellGrid::new().with(at(1, 1), ignite);

    assert_eq!(grid.source_of(at(1, 1), 0), Some(at(0, 1)));
    // `time` is disconnected
    assert_eq!(grid.source_of(at(1, 1), 1), None);
    // no such slot
    assert_eq!(grid.source_of(at(1, 1), 2), None);
    // empty cell
    assert_eq!(grid.source_of(at(4, 4), 0), None);
}

#[test]
fn source_of_off_the_edge_is_none() {
    let ignite = Piece::new(PieceKind::Ignite)
        .with_param(param::TARGET, Side::Top)
        .unwrap();
    let grid = SpellGrid::new().with(at(3, 0), ignite);
    assert_eq!(grid.source_of(at(3, 0), 0), None);
    assert_eq!(
        grid.connections(at(3, 0)),
        vec![(Side::Top, None), (Side::Off, None)]
    );
}

#[test]
fn structural_equality() {
    let a = SpellGrid::new().with(at(0, 0), Piece::number(1.0));
    let b = SpellGrid::new().with(at(0, 0), Piece::number(1.0));
    let c = SpellGrid::new().with(at(0, 0), Piece::number(2.0));
    assert_eq!(a, b);
    assert_ne!(a, c);
}
