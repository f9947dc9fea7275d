use spell_compile::{CompiledPiece, CompiledSpell};
use spell_ir::{param, PieceKind};

use super::{whole_ticks, EvalResult};
use crate::context::SpellContext;
use crate::interpreter::Interpreter;

impl Interpreter<'_> {
    /// Push the actions a control piece selects. They run next, before any
    /// action that was already pending.
    pub(super) fn run_control(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
        piece: &CompiledPiece,
    ) -> EvalResult<()> {
        match piece.kind {
            PieceKind::Repeat => {
                let count = whole_ticks(self.number(ctx, spell, piece, param::COUNT)?);
                if let Some(body) = Self::action(spell, piece, param::BODY) {
                    ctx.with_runtime(|rt| {
                        rt.actions
                            .extend(std::iter::repeat(body).take(count as usize));
                    });
                }
            }
            PieceKind::Branch => {
                let condition = self.number(ctx, spell, piece, param::CONDITION)?;
                let slot = if condition == 0.0 {
                    param::OTHERWISE
                } else {
                    param::THEN
                };
                if let Some(chosen) = Self::action(spell, piece, slot) {
                    ctx.with_runtime(|rt| rt.actions.push(chosen));
                }
            }
            _ => {}
        }
        Ok(())
    }
}
