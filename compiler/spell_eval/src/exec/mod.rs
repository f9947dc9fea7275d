//! Piece evaluation and action execution.
//!
//! - `operator`: selectors, constants and operators, evaluated on demand
//!   and memoized per cell for the current cast
//! - `trick`: world effects and cast-level effects (delay, die, debug)
//! - `control`: pieces that push more actions onto the stack

use spell_compile::{Action, CompiledPiece, CompiledSpell, Input};
use spell_ir::{Coord, EntityRef, PieceCategory, Value, ValueType, Vector3};

use crate::context::SpellContext;
use crate::errors::{RuntimeError, RuntimeErrorKind};
use crate::interpreter::Interpreter;

mod control;
mod operator;
mod trick;

type EvalResult<T> = Result<T, RuntimeError>;

impl Interpreter<'_> {
    pub(crate) fn run_action(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        action: Action,
    ) -> EvalResult<()> {
        let Some(piece) = spell.piece(action.coord) else {
            return Ok(());
        };
        match piece.kind.category() {
            PieceCategory::Trick => self.run_trick(ctx, spell, piece),
            PieceCategory::Control => self.run_control(ctx, spell, piece),
            _ => Ok(()),
        }
    }

    /// The value produced by the piece at `at`, evaluating it at most once
    /// per cast.
    pub(crate) fn evaluate(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        at: Coord,
    ) -> EvalResult<Value> {
        if let Some(value) = ctx.memo(at.index()) {
            return Ok(value);
        }
        let Some(piece) = spell.piece(at) else {
            return Ok(Value::Null);
        };
        let value = self
            .eval_piece(ctx, spell, piece)
            .map_err(|err| err.in_piece(at, piece.kind))?;
        tracing::trace!(kind = %piece.kind, %at, %value, "evaluated");
        ctx.set_memo(at.index(), value);
        Ok(value)
    }

    fn input(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
        name: &'static str,
    ) -> EvalResult<Value> {
        match piece.input(name) {
            Some(Input::Piece(at)) => self.evaluate(ctx, spell, at),
            Some(Input::Constant(value)) => Ok(value),
            Some(Input::NoAction) | None => Ok(Value::Null),
        }
    }

    fn number(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
        name: &'static str,
    ) -> EvalResult<f64> {
        let value = self.input(ctx, spell, piece, name)?;
        value
            .as_number()
            .ok_or_else(|| unexpected(name, ValueType::Number, value))
    }

    fn vector(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
        name: &'static str,
    ) -> EvalResult<Vector3> {
        let value = self.input(ctx, spell, piece, name)?;
        value
            .as_vector()
            .ok_or_else(|| unexpected(name, ValueType::Vector, value))
    }

    /// An entity slot; `None` when the producer selected nothing.
    fn entity(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
        name: &'static str,
    ) -> EvalResult<Option<EntityRef>> {
        match self.input(ctx, spell, piece, name)? {
            Value::Null => Ok(None),
            Value::Entity(entity) => Ok(Some(entity)),
            other => Err(unexpected(name, ValueType::Entity, other)),
        }
    }

    /// The trick bound to action slot `name`, if any.
    fn action(spell: &CompiledSpell, piece: &CompiledPiece, name: &'static str) -> Option<Action> {
        match piece.input(name)? {
            Input::Piece(coord) => spell.piece(coord).map(|body| Action {
                coord,
                kind: body.kind,
            }),
            Input::Constant(_) | Input::NoAction => None,
        }
    }
}

fn unexpected(param: &'static str, expected: ValueType, found: Value) -> RuntimeError {
    RuntimeErrorKind::UnexpectedValue {
        param,
        expected: expected.name(),
        found: found.type_name(),
    }
    .into()
}

/// A statically validated count or duration.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to the u32 range before the cast"
)]
fn whole_ticks(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
