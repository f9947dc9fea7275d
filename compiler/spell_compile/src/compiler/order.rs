//! Dependency cycles, body ownership, and action ordering.

use spell_ir::{Coord, ParamType, PieceCategory, GRID_SIZE};

use super::Compiler;
use crate::artifact::{Action, Input};
use crate::errors::{CompileError, CompileErrorKind};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// For each cell, the control piece that schedules it (if any).
pub(super) type BodyOwners = Vec<Option<Coord>>;

impl Compiler<'_> {
    /// Reject value dependencies that loop back on themselves.
    ///
    /// Action slots are not data edges and are skipped.
    pub(super) fn check_cycles(&self) -> Result<(), CompileError> {
        let mut marks = vec![Mark::Unvisited; GRID_SIZE * GRID_SIZE];
        for at in Coord::all() {
            if self.pieces[at.index()].is_some() && marks[at.index()] == Mark::Unvisited {
                self.visit(at, &mut marks)?;
            }
        }
        Ok(())
    }

    fn visit(&self, at: Coord, marks: &mut [Mark]) -> Result<(), CompileError> {
        marks[at.index()] = Mark::InProgress;
        if let Some(piece) = &self.pieces[at.index()] {
            for (spec, input) in piece.kind.params().iter().zip(&piece.inputs) {
                if spec.ty == ParamType::Action {
                    continue;
                }
                let Input::Piece(dep) = *input else {
                    continue;
                };
                match marks[dep.index()] {
                    Mark::InProgress => {
                        return Err(CompileError::at(
                            CompileErrorKind::InfiniteLoop,
                            at,
                            piece.kind,
                        ))
                    }
                    Mark::Unvisited => self.visit(dep, marks)?,
                    Mark::Done => {}
                }
            }
        }
        marks[at.index()] = Mark::Done;
        Ok(())
    }

    /// Each trick may be scheduled by at most one control piece.
    pub(super) fn assign_bodies(&self) -> Result<BodyOwners, CompileError> {
        let mut owners: BodyOwners = vec![None; GRID_SIZE * GRID_SIZE];
        for at in Coord::all() {
            let Some(piece) = &self.pieces[at.index()] else {
                continue;
            };
            if piece.kind.category() != PieceCategory::Control {
                continue;
            }
            for (spec, input) in piece.kind.params().iter().zip(&piece.inputs) {
                let (ParamType::Action, Input::Piece(body)) = (spec.ty, *input) else {
                    continue;
                };
                match owners[body.index()] {
                    Some(other) if other != at => {
                        return Err(CompileError::at(
                            CompileErrorKind::SharedBody { other },
                            at,
                            piece.kind,
                        ));
                    }
                    _ => owners[body.index()] = Some(at),
                }
            }
        }
        Ok(owners)
    }

    /// Tricks and controls in reading order, minus scheduled bodies.
    pub(super) fn emit_actions(&self, owners: &BodyOwners) -> Vec<Action> {
        Coord::all()
            .filter(|at| owners[at.index()].is_none())
            .filter_map(|at| {
                let piece = self.pieces[at.index()].as_ref()?;
                piece.kind.category().is_action().then_some(Action {
                    coord: at,
                    kind: piece.kind,
                })
            })
            .collect()
    }
}
