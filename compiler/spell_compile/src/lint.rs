//! Warnings for spells that compile but are probably not what the author
//! meant.

use spell_diagnostic::{Diagnostic, ErrorCode};
use spell_ir::{Coord, Output, GRID_SIZE};

use crate::artifact::{CompiledSpell, Input};

/// One warning per selector, constant or operator whose output no slot
/// reads, in reading order.
///
/// Reads through connectors count, since consumers are bound to the
/// producer behind them.
pub fn unused_pieces(spell: &CompiledSpell) -> Vec<Diagnostic> {
    let mut read = [false; GRID_SIZE * GRID_SIZE];
    for at in Coord::all() {
        let Some(piece) = spell.piece(at) else {
            continue;
        };
        for input in &piece.inputs {
            if let Input::Piece(source) = *input {
                read[source.index()] = true;
            }
        }
    }

    Coord::all()
        .filter(|at| !read[at.index()])
        .filter_map(|at| {
            let piece = spell.piece(at)?;
            matches!(piece.kind.output(), Output::Value(_)).then(|| {
                Diagnostic::warning(ErrorCode::W0001)
                    .with_message(format!("output of `{}` is never read", piece.kind.id()))
                    .at(at)
                    .with_piece(piece.kind.id())
                    .with_suggestion("bind a parameter to it, or remove it")
            })
        })
        .collect()
}
