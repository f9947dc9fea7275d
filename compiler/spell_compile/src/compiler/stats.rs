//! Static folding, per-piece validation, and stat accounting.

use spell_ir::{param, Coord, PieceKind, SpellStat, Value};

use super::order::BodyOwners;
use super::Compiler;
use crate::artifact::{CompiledPiece, Input, SpellMetadata};
use crate::errors::{CompileError, CompileErrorKind};

impl Compiler<'_> {
    pub(super) fn account(&self, owners: &BodyOwners) -> Result<SpellMetadata, CompileError> {
        let mut meta = SpellMetadata::default();
        for at in Coord::all() {
            if let Some(piece) = &self.pieces[at.index()] {
                let runs = self.runs_per_cast(owners[at.index()]);
                self.account_piece(at, piece, runs, &mut meta)?;
            }
        }

        let complexity = meta.stat(SpellStat::Complexity);
        if let Some(limit) = self.config.max_complexity {
            if complexity > limit {
                return Err(CompileError::new(CompileErrorKind::ComplexityExceeded {
                    complexity,
                    limit,
                }));
            }
        }
        Ok(meta)
    }

    /// How often a piece scheduled by `owner` runs per cast. Bodies of a
    /// repeat run `count` times; a branch body is counted once. An invalid
    /// count counts once here and is reported when the repeat is accounted.
    fn runs_per_cast(&self, owner: Option<Coord>) -> u32 {
        let Some(owner) = owner.and_then(|at| self.pieces[at.index()].as_ref()) else {
            return 1;
        };
        if owner.kind != PieceKind::Repeat {
            return 1;
        }
        positive_integer(self.static_input(owner, param::COUNT))
            .filter(|count| *count <= self.config.max_repeat)
            .unwrap_or(1)
    }

    /// Potency and cost are multiplied by `runs`; complexity is not.
    fn account_piece(
        &self,
        at: Coord,
        piece: &CompiledPiece,
        runs: u32,
        meta: &mut SpellMetadata,
    ) -> Result<(), CompileError> {
        if piece.kind == PieceKind::ErrorSuppressor {
            meta.set_errors_suppressed();
            return Ok(());
        }

        let fail = |kind: CompileErrorKind| CompileError::at(kind, at, piece.kind);
        let mut add = |stat: SpellStat, amount: Option<u32>| {
            let runs = if stat == SpellStat::Complexity { 1 } else { runs };
            amount
                .and_then(|amount| amount.checked_mul(runs))
                .and_then(|amount| meta.add_stat(stat, amount).ok())
                .ok_or_else(|| fail(CompileErrorKind::StatOverflow { stat }))
        };
        let integer = |name: &'static str| {
            positive_integer(self.static_input(piece, name))
                .ok_or_else(|| fail(CompileErrorKind::NonPositiveInteger { param: name }))
        };
        let positive = |name: &'static str| {
            self.static_input(piece, name)
                .filter(|v| *v > 0.0 && v.is_finite())
                .ok_or_else(|| fail(CompileErrorKind::NonPositiveValue { param: name }))
        };

        add(SpellStat::Complexity, Some(1))?;

        match piece.kind {
            PieceKind::Ignite => {
                let time = integer(param::TIME)?;
                add(SpellStat::Potency, time.checked_mul(40))?;
                add(SpellStat::Cost, time.checked_mul(65))?;
            }
            PieceKind::AddMotion => {
                let speed = positive(param::SPEED)?;
                add(SpellStat::Potency, ceil_stat(speed * 70.0))?;
                add(SpellStat::Cost, ceil_stat(speed * 100.0))?;
            }
            PieceKind::Explode => {
                let power = positive(param::POWER)?;
                add(SpellStat::Potency, ceil_stat(power * 70.0))?;
                add(SpellStat::Cost, ceil_stat(power * 210.0))?;
            }
            PieceKind::BreakBlock => {
                add(SpellStat::Potency, Some(20))?;
                add(SpellStat::Cost, Some(50))?;
            }
            PieceKind::PlaceBlock => {
                add(SpellStat::Potency, Some(5))?;
                add(SpellStat::Cost, Some(8))?;
            }
            PieceKind::Delay => {
                integer(param::TIME)?;
                add(SpellStat::Potency, Some(10))?;
                add(SpellStat::Cost, Some(20))?;
            }
            PieceKind::Repeat => {
                let count = integer(param::COUNT)?;
                let limit = self.config.max_repeat;
                if count > limit {
                    return Err(fail(CompileErrorKind::RepeatLimit { count, limit }));
                }
                add(SpellStat::Cost, count.checked_mul(5))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// The compile-time value of slot `name`, if it is statically known.
    fn static_input(&self, piece: &CompiledPiece, name: &str) -> Option<f64> {
        match piece.input(name)? {
            Input::Constant(Value::Number(n)) => Some(n),
            Input::Piece(at) => self.static_value(at),
            Input::Constant(_) | Input::NoAction => None,
        }
    }

    /// Fold constants through `sum` and `multiply`. Only called after cycle
    /// detection, so recursion terminates.
    fn static_value(&self, at: Coord) -> Option<f64> {
        let piece = self.pieces[at.index()].as_ref()?;
        match piece.kind {
            PieceKind::Number(lit) => Some(lit.get()),
            PieceKind::Sum => {
                Some(self.static_input(piece, param::A)? + self.static_input(piece, param::B)?)
            }
            PieceKind::Multiply => {
                Some(self.static_input(piece, param::A)? * self.static_input(piece, param::B)?)
            }
            _ => None,
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range checked before the cast"
)]
fn positive_integer(value: Option<f64>) -> Option<u32> {
    let v = value?;
    (v > 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX)).then(|| v as u32)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "range checked before the cast"
)]
fn ceil_stat(value: f64) -> Option<u32> {
    let v = value.ceil();
    (v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX)).then(|| v as u32)
}
