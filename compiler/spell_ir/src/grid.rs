//! Spell grid storage and connectivity queries.

use crate::coord::{Coord, Side, GRID_SIZE};
use crate::piece::Piece;

/// A spell program: a fixed `GRID_SIZE` x `GRID_SIZE` array of optional pieces.
///
/// Equality and hashing are structural, which is what the compile cache keys
/// on: two grids with the same pieces in the same cells compile to the same
/// artifact.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct SpellGrid {
    /// Indexed `[y][x]`.
    cells: [[Option<Piece>; GRID_SIZE]; GRID_SIZE],
}

impl SpellGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, at: Coord) -> Option<&Piece> {
        self.cells[at.y()][at.x()].as_ref()
    }

    /// Place `piece` at `at`, returning whatever was there before.
    pub fn set(&mut self, at: Coord, piece: Piece) -> Option<Piece> {
        self.cells[at.y()][at.x()].replace(piece)
    }

    pub fn remove(&mut self, at: Coord) -> Option<Piece> {
        self.cells[at.y()][at.x()].take()
    }

    /// Builder form of [`SpellGrid::set`].
    #[must_use]
    pub fn with(mut self, at: Coord, piece: Piece) -> Self {
        self.set(at, piece);
        self
    }

    /// Every non-empty cell, in reading order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, &Piece)> + '_ {
        Coord::all().filter_map(move |at| self.get(at).map(|piece| (at, piece)))
    }

    pub fn len(&self) -> usize {
        self.pieces().count()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().next().is_none()
    }

    /// The cell feeding slot `slot` of the piece at `at`.
    ///
    /// `None` if there is no piece at `at`, the slot does not exist, it is
    /// disconnected, or it points off the edge of the grid. Whether the
    /// returned cell actually holds a piece is for the caller to check.
    pub fn source_of(&self, at: Coord, slot: usize) -> Option<Coord> {
        let side = self.get(at)?.side(slot)?;
        at.step(side)
    }

    /// Sides bound by the piece at `at`, paired with the cell each one reads.
    pub fn connections(&self, at: Coord) -> Vec<(Side, Option<Coord>)> {
        self.get(at).map_or_else(Vec::new, |piece| {
            piece
                .slots()
                .map(|(_, side)| (side, at.step(side)))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests;
