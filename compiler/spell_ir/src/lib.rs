//! Spell IR - program representation for the spell compiler.
//!
//! A spell is a fixed-size grid of pieces. Each piece has a kind drawn from a
//! closed registry and a set of typed parameter slots; a slot is bound to one
//! side of the piece and reads the output of the neighbouring cell on that
//! side.
//!
//! # Overview
//!
//! - [`Coord`] / [`Side`]: grid addressing and slot direction
//! - [`Piece`] / [`PieceKind`]: grid nodes and the piece registry
//! - [`SpellGrid`]: structural storage and connectivity queries
//! - [`Value`] / [`Vector3`] / [`EntityRef`]: runtime values
//! - [`SpellStat`]: named accumulators filled in during compilation
//!
//! The grid performs no validation beyond bounds; every semantic check lives
//! in `spell_compile`.

mod coord;
mod grid;
mod piece;
mod stats;
mod value;

pub use coord::{Coord, Side, GRID_SIZE};
pub use grid::SpellGrid;
pub use piece::{
    lookup_piece, param, Fallback, Literal, Output, ParamSpec, ParamType, Piece, PieceCategory,
    PieceKind, UnknownParam, MAX_PARAMS,
};
pub use stats::SpellStat;
pub use value::{EntityRef, Value, ValueType, Vector3};
