use spell_compile::{CompiledPiece, CompiledSpell};
use spell_ir::{param, PieceKind, Value, Vector3};

use super::EvalResult;
use crate::context::SpellContext;
use crate::errors::RuntimeErrorKind;
use crate::interpreter::Interpreter;

impl Interpreter<'_> {
    pub(super) fn eval_piece(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
    ) -> EvalResult<Value> {
        let value = match piece.kind {
            PieceKind::Caster => Value::Entity(ctx.caster()),
            PieceKind::FocalPoint => Value::Entity(ctx.focal_point()),
            PieceKind::AttackedEntity => ctx.attacked_entity().map_or(Value::Null, Value::Entity),
            PieceKind::Attacker => ctx.attacking_entity().map_or(Value::Null, Value::Entity),
            PieceKind::DamageTaken => Value::Number(ctx.damage_taken()),
            PieceKind::LoopIndex => Value::Number(f64::from(ctx.loop_index())),
            PieceKind::Number(lit) => Value::Number(lit.get()),

            PieceKind::Sum => {
                let a = self.number(ctx, spell, piece, param::A)?;
                let b = self.number(ctx, spell, piece, param::B)?;
                Value::Number(a + b)
            }
            PieceKind::Multiply => {
                let a = self.number(ctx, spell, piece, param::A)?;
                let b = self.number(ctx, spell, piece, param::B)?;
                Value::Number(a * b)
            }
            PieceKind::VectorConstruct => {
                let x = self.number(ctx, spell, piece, param::X)?;
                let y = self.number(ctx, spell, piece, param::Y)?;
                let z = self.number(ctx, spell, piece, param::Z)?;
                Value::Vector(Vector3::new(x, y, z))
            }
            PieceKind::VectorSum => {
                let a = self.vector(ctx, spell, piece, param::A)?;
                let b = self.vector(ctx, spell, piece, param::B)?;
                Value::Vector(a + b)
            }
            PieceKind::VectorScale => {
                let v = self.vector(ctx, spell, piece, param::VECTOR)?;
                let factor = self.number(ctx, spell, piece, param::FACTOR)?;
                Value::Vector(v.scale(factor))
            }
            PieceKind::EntityPosition => {
                let entity = self
                    .entity(ctx, spell, piece, param::TARGET)?
                    .ok_or(RuntimeErrorKind::NullTarget)?;
                let position = self
                    .world
                    .position(entity)
                    .ok_or(RuntimeErrorKind::NullTarget)?;
                Value::Vector(position)
            }

            // Effects and structure produce nothing readable.
            PieceKind::Connector
            | PieceKind::ErrorSuppressor
            | PieceKind::Debug
            | PieceKind::Ignite
            | PieceKind::AddMotion
            | PieceKind::Explode
            | PieceKind::BreakBlock
            | PieceKind::PlaceBlock
            | PieceKind::Delay
            | PieceKind::Die
            | PieceKind::Repeat
            | PieceKind::Branch => Value::Null,
        };
        Ok(value)
    }
}
