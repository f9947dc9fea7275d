#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rayon::prelude::*;
use spell_ir::{param, Coord, Piece, PieceKind, Side, SpellGrid};

use super::*;

fn ignite_grid(time: f64) -> SpellGrid {
    let ignite = Piece::new(PieceKind::Ignite)
        .with_param(param::TARGET, Side::Left)
        .unwrap()
        .with_param(param::TIME, Side::Bottom)
        .unwrap();
    SpellGrid::new()
        .with(Coord::new(0, 0).unwrap(), Piece::new(PieceKind::Caster))
        .with(Coord::new(1, 0).unwrap(), ignite)
        .with(Coord::new(1, 1).unwrap(), Piece::number(time))
}

#[test]
fn equal_grids_share_one_artifact() {
    let cache = SpellCache::default();
    let first = cache.get_or_compile(&ignite_grid(2.0)).unwrap();
    let second = cache.get_or_compile(&ignite_grid(2.0)).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.compile_count(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn different_grids_compile_separately() {
    let cache = SpellCache::default();
    let a = cache.get_or_compile(&ignite_grid(1.0)).unwrap();
    let b = cache.get_or_compile(&ignite_grid(2.0)).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(cache.compile_count(), 2);
}

#[test]
fn failures_are_not_cached() {
    let cache = SpellCache::default();
    assert!(cache.get_or_compile(&ignite_grid(0.0)).is_err());
    assert!(cache.get_or_compile(&ignite_grid(0.0)).is_err());
    assert!(cache.is_empty());
}

#[test]
fn least_recently_used_entry_is_evicted() {
    let cache = SpellCache::with_capacity(CompilerConfig::default(), 2);
    let one = cache.get_or_compile(&ignite_grid(1.0)).unwrap();
    cache.get_or_compile(&ignite_grid(2.0)).unwrap();
    // touch 1.0 so 2.0 becomes the oldest
    cache.get_or_compile(&ignite_grid(1.0)).unwrap();
    cache.get_or_compile(&ignite_grid(3.0)).unwrap();
    assert_eq!(cache.len(), 2);

    let again = cache.get_or_compile(&ignite_grid(1.0)).unwrap();
    assert!(Arc::ptr_eq(&one, &again));
    assert_eq!(cache.compile_count(), 3);

    cache.get_or_compile(&ignite_grid(2.0)).unwrap();
    assert_eq!(cache.compile_count(), 4);
}

#[test]
fn concurrent_requests_compile_once() {
    let cache = SpellCache::default();
    let spells: Vec<_> = (0..64)
        .into_par_iter()
        .map(|_| cache.get_or_compile(&ignite_grid(3.0)).unwrap())
        .collect();
    assert_eq!(cache.compile_count(), 1);
    assert!(spells.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn clear_drops_entries() {
    let cache = SpellCache::default();
    cache.get_or_compile(&ignite_grid(1.0)).unwrap();
    cache.clear();
    assert!(cache.is_empty());
    cache.get_or_compile(&ignite_grid(1.0)).unwrap();
    assert_eq!(cache.compile_count(), 2);
}
