//! Slot resolution and type checking.

use smallvec::SmallVec;
use spell_ir::{
    param, Coord, Fallback, Output, ParamSpec, ParamType, Piece, PieceCategory, PieceKind, Side,
    Value, MAX_PARAMS,
};

use super::Compiler;
use crate::artifact::{CompiledPiece, Input};
use crate::errors::{CompileError, CompileErrorKind};

impl Compiler<'_> {
    /// Bind every slot of every piece. Connectors are validated here and
    /// then dropped; consumers read straight from the producer behind them.
    pub(super) fn resolve_all(&mut self) -> Result<(), CompileError> {
        let grid = self.grid;
        for (at, piece) in grid.pieces() {
            check_sides(at, piece)?;

            let mut inputs = SmallVec::new();
            for (spec, side) in piece.slots() {
                inputs.push(self.resolve_slot(at, piece.kind(), spec, side)?);
            }

            if piece.kind() != PieceKind::Connector {
                self.pieces[at.index()] = Some(CompiledPiece {
                    kind: piece.kind(),
                    inputs,
                });
            }
        }
        Ok(())
    }

    fn resolve_slot(
        &self,
        at: Coord,
        kind: PieceKind,
        spec: &ParamSpec,
        side: Side,
    ) -> Result<Input, CompileError> {
        let fail = |kind_err: CompileErrorKind| CompileError::at(kind_err, at, kind);

        if !side.is_connected() {
            return match spec.fallback {
                Fallback::Required => Err(fail(CompileErrorKind::UnsetParam { param: spec.name })),
                Fallback::Number(n) => Ok(Input::Constant(Value::Number(n))),
                Fallback::Null => Ok(Input::Constant(Value::Null)),
                Fallback::NoAction => Ok(Input::NoAction),
            };
        }

        let source = self
            .occupied(at.step(side))
            .ok_or_else(|| fail(CompileErrorKind::MissingSource { param: spec.name }))?;
        let (producer, producer_kind) = self.follow_connectors(source)?;

        if spec.ty == ParamType::Action {
            if producer_kind.category() != PieceCategory::Trick {
                return Err(fail(CompileErrorKind::InvalidActionTarget {
                    param: spec.name,
                    found: producer_kind.id(),
                }));
            }
        } else {
            let accepted = match producer_kind.output() {
                Output::Value(ty) => spec.ty.accepts(ty),
                Output::Nothing | Output::Forward => false,
            };
            if !accepted {
                return Err(fail(CompileErrorKind::InvalidParam {
                    param: spec.name,
                    expected: spec.ty.name(),
                    found: output_name(producer_kind),
                }));
            }
        }

        Ok(Input::Piece(producer))
    }

    /// Walk a connector chain starting at `start` to the first non-connector.
    fn follow_connectors(&self, start: Coord) -> Result<(Coord, PieceKind), CompileError> {
        let mut visited: SmallVec<[Coord; 8]> = SmallVec::new();
        let mut current = start;
        loop {
            let kind = match self.grid.get(current) {
                Some(piece) => piece.kind(),
                None => {
                    return Err(CompileError::at(
                        CompileErrorKind::MissingSource {
                            param: param::TARGET,
                        },
                        current,
                        PieceKind::Connector,
                    ))
                }
            };
            if kind != PieceKind::Connector {
                return Ok((current, kind));
            }
            if visited.contains(&current) {
                return Err(CompileError::at(
                    CompileErrorKind::InfiniteLoop,
                    current,
                    PieceKind::Connector,
                ));
            }
            visited.push(current);

            let side = self
                .grid
                .get(current)
                .and_then(|piece| piece.side(0))
                .unwrap_or_default();
            if !side.is_connected() {
                return Err(CompileError::at(
                    CompileErrorKind::UnsetParam {
                        param: param::TARGET,
                    },
                    current,
                    PieceKind::Connector,
                ));
            }
            let next = self.occupied(current.step(side)).ok_or_else(|| {
                CompileError::at(
                    CompileErrorKind::MissingSource {
                        param: param::TARGET,
                    },
                    current,
                    PieceKind::Connector,
                )
            })?;
            current = next;
        }
    }

    /// `at`, if it names a cell holding a piece.
    fn occupied(&self, at: Option<Coord>) -> Option<Coord> {
        at.filter(|c| self.grid.get(*c).is_some())
    }
}

/// Two slots of one piece may not read from the same side.
fn check_sides(at: Coord, piece: &Piece) -> Result<(), CompileError> {
    let mut seen: SmallVec<[Side; MAX_PARAMS]> = SmallVec::new();
    for (_, side) in piece.slots() {
        if !side.is_connected() {
            continue;
        }
        if seen.contains(&side) {
            return Err(CompileError::at(
                CompileErrorKind::SameSideParams { side },
                at,
                piece.kind(),
            ));
        }
        seen.push(side);
    }
    Ok(())
}

fn output_name(kind: PieceKind) -> &'static str {
    match kind.output() {
        Output::Value(ty) => ty.name(),
        Output::Nothing | Output::Forward => kind.id(),
    }
}
