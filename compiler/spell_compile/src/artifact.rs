//! The executable artifact produced by a successful compilation.

use std::sync::Arc;

use smallvec::SmallVec;
use spell_ir::{Coord, PieceKind, SpellGrid, SpellStat, Value, GRID_SIZE, MAX_PARAMS};

/// A resolved parameter slot.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Input {
    /// Read the output of the piece at this cell (connectors already
    /// followed). For action slots, the trick to schedule.
    Piece(Coord),
    /// An unconnected optional slot's default.
    Constant(Value),
    /// An unconnected optional action slot.
    NoAction,
}

/// A piece with its slots resolved.
#[derive(Clone, PartialEq, Debug)]
pub struct CompiledPiece {
    pub kind: PieceKind,
    /// One entry per declared slot of `kind`, in declaration order.
    pub inputs: SmallVec<[Input; MAX_PARAMS]>,
}

impl CompiledPiece {
    /// Input bound to the slot called `name`.
    pub fn input(&self, name: &str) -> Option<Input> {
        let index = self.kind.param_index(name)?;
        self.inputs.get(index).copied()
    }
}

/// One top-level action: a trick or control piece.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Action {
    pub coord: Coord,
    pub kind: PieceKind,
}

/// Aggregate stats and flags computed at compile time.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct SpellMetadata {
    stats: [u32; SpellStat::COUNT],
    errors_suppressed: bool,
}

impl SpellMetadata {
    #[inline]
    pub fn stat(&self, stat: SpellStat) -> u32 {
        self.stats[stat.index()]
    }

    /// Add `amount` to `stat`; `Err(())` on overflow, leaving the stat unchanged.
    pub(crate) fn add_stat(&mut self, stat: SpellStat, amount: u32) -> Result<(), ()> {
        let slot = &mut self.stats[stat.index()];
        *slot = slot.checked_add(amount).ok_or(())?;
        Ok(())
    }

    /// Whether an `error_suppressor` piece is present.
    #[inline]
    pub fn errors_suppressed(&self) -> bool {
        self.errors_suppressed
    }

    pub(crate) fn set_errors_suppressed(&mut self) {
        self.errors_suppressed = true;
    }
}

/// A validated spell, ready to cast.
///
/// Immutable after construction and shared between casts as
/// `Arc<CompiledSpell>`. Two compilations of equal grids compare equal.
#[derive(Clone, PartialEq, Debug)]
pub struct CompiledSpell {
    program: Arc<SpellGrid>,
    /// Indexed by [`Coord::index`]; `None` for empty cells and connectors.
    pieces: Vec<Option<CompiledPiece>>,
    actions: Vec<Action>,
    metadata: SpellMetadata,
}

impl CompiledSpell {
    pub(crate) fn new(
        program: Arc<SpellGrid>,
        pieces: Vec<Option<CompiledPiece>>,
        actions: Vec<Action>,
        metadata: SpellMetadata,
    ) -> Self {
        debug_assert_eq!(pieces.len(), GRID_SIZE * GRID_SIZE);
        CompiledSpell {
            program,
            pieces,
            actions,
            metadata,
        }
    }

    /// The source grid this spell was compiled from.
    pub fn program(&self) -> &Arc<SpellGrid> {
        &self.program
    }

    pub fn piece(&self, at: Coord) -> Option<&CompiledPiece> {
        self.pieces.get(at.index()).and_then(Option::as_ref)
    }

    /// Top-level actions in reading order. Tricks scheduled by a control
    /// piece are not listed.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn metadata(&self) -> &SpellMetadata {
        &self.metadata
    }
}
