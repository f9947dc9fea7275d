//! The compilation pipeline.
//!
//! Passes share one [`Compiler`] and each lives in its own submodule. Every
//! pass walks cells in reading order, so for a given grid the first error
//! reported is always the same one.

use std::sync::Arc;

use spell_ir::{SpellGrid, GRID_SIZE};

use crate::artifact::{CompiledPiece, CompiledSpell};
use crate::config::CompilerConfig;
use crate::errors::{CompileError, CompileErrorKind};

mod order;
mod resolve;
mod stats;

/// Compile `program` into an executable spell.
///
/// Pure and deterministic: equal grids and configs always produce equal
/// results.
#[tracing::instrument(level = "debug", skip_all, fields(pieces = program.len()))]
pub fn compile(
    program: &Arc<SpellGrid>,
    config: &CompilerConfig,
) -> Result<CompiledSpell, CompileError> {
    let result = Compiler::new(program, config).run(program);
    if let Err(err) = &result {
        tracing::debug!(code = %err.code(), at = ?err.at, "compilation failed");
    }
    result
}

struct Compiler<'a> {
    grid: &'a SpellGrid,
    config: &'a CompilerConfig,
    /// Filled by `resolve`, indexed by `Coord::index`.
    pieces: Vec<Option<CompiledPiece>>,
}

impl<'a> Compiler<'a> {
    fn new(grid: &'a SpellGrid, config: &'a CompilerConfig) -> Self {
        Compiler {
            grid,
            config,
            pieces: vec![None; GRID_SIZE * GRID_SIZE],
        }
    }

    fn run(mut self, program: &Arc<SpellGrid>) -> Result<CompiledSpell, CompileError> {
        let has_action = self
            .grid
            .pieces()
            .any(|(_, piece)| piece.kind().category().is_action());
        if !has_action {
            return Err(CompileError::new(CompileErrorKind::NoTricks));
        }

        self.resolve_all()?;
        self.check_cycles()?;
        let owners = self.assign_bodies()?;
        let metadata = self.account(&owners)?;
        let actions = self.emit_actions(&owners);

        Ok(CompiledSpell::new(
            Arc::clone(program),
            self.pieces,
            actions,
            metadata,
        ))
    }
}
