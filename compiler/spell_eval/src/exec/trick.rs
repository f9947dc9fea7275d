use spell_compile::{CompiledPiece, CompiledSpell};
use spell_ir::{param, EntityRef, PieceKind, Value, Vector3};

use super::{whole_ticks, EvalResult};
use crate::context::SpellContext;
use crate::errors::RuntimeErrorKind;
use crate::interpreter::Interpreter;

impl Interpreter<'_> {
    pub(super) fn run_trick(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
    ) -> EvalResult<()> {
        match piece.kind {
            PieceKind::Debug => {
                let target = self.input(ctx, spell, piece, param::TARGET)?;
                let message = match self.input(ctx, spell, piece, param::NUMBER)? {
                    Value::Null => target.to_string(),
                    number => format!("{number}: {target}"),
                };
                self.feedback.debug(ctx.caster(), &message);
            }
            PieceKind::Ignite => {
                let target = self.target(ctx, spell, piece)?;
                let time = self.number(ctx, spell, piece, param::TIME)?;
                self.world.ignite(target, whole_ticks(time));
            }
            PieceKind::AddMotion => {
                let target = self.target(ctx, spell, piece)?;
                let direction = self.vector(ctx, spell, piece, param::DIRECTION)?;
                let speed = self.number(ctx, spell, piece, param::SPEED)?;
                let unit = direction.normalized().ok_or(RuntimeErrorKind::NullVector)?;
                self.world.add_motion(target, unit.scale(speed));
            }
            PieceKind::Explode => {
                let position = self.position(ctx, spell, piece)?;
                let power = self.number(ctx, spell, piece, param::POWER)?;
                self.world.explode(position, power);
            }
            PieceKind::BreakBlock => {
                let position = self.position(ctx, spell, piece)?;
                let tool = ctx.harvest_tool(&*self.world)?;
                let required = self.world.block_requirement(position);
                if !self.world.tool_capabilities(tool).contains(required) {
                    return Err(RuntimeErrorKind::MissingCapability { required }.into());
                }
                self.world.break_block(position, tool);
            }
            PieceKind::PlaceBlock => {
                let position = self.position(ctx, spell, piece)?;
                let slot = ctx.target_slot(&*self.world)?;
                self.world.place_block(position, slot);
            }
            PieceKind::Delay => {
                let time = self.number(ctx, spell, piece, param::TIME)?;
                let ticks = whole_ticks(time);
                ctx.with_runtime(|rt| rt.delay = ticks);
            }
            PieceKind::Die => {
                if self.number(ctx, spell, piece, param::CONDITION)? == 0.0 {
                    ctx.stop();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// The verified, in-radius entity bound to `target`.
    fn target(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
    ) -> EvalResult<EntityRef> {
        let entity = self.entity(ctx, spell, piece, param::TARGET)?;
        let entity = ctx.verify_entity(&*self.world, entity)?;
        if !ctx.is_entity_in_radius(&*self.world, Some(entity)) {
            return Err(RuntimeErrorKind::OutsideRadius.into());
        }
        Ok(entity)
    }

    /// The in-radius point bound to `position`.
    fn position(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
    ) -> EvalResult<Vector3> {
        let position = self.vector(ctx, spell, piece, param::POSITION)?;
        if !ctx.is_in_radius(&*self.world, position) {
            return Err(RuntimeErrorKind::OutsideRadius.into());
        }
        Ok(position)
    }
}
