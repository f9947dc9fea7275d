//! Compile-time errors.
//!
//! A compile error is fatal to one compilation attempt. It always carries a
//! stable [`ErrorCode`] and, except for [`CompileErrorKind::NoTricks`], the
//! grid cell of the offending piece.

use std::fmt;

use spell_diagnostic::{Diagnostic, ErrorCode};
use spell_ir::{Coord, PieceKind, Side, SpellStat};

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompileErrorKind {
    NoTricks,
    UnsetParam {
        param: &'static str,
    },
    MissingSource {
        param: &'static str,
    },
    InvalidParam {
        param: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    SameSideParams {
        side: Side,
    },
    InfiniteLoop,
    NonPositiveInteger {
        param: &'static str,
    },
    NonPositiveValue {
        param: &'static str,
    },
    StatOverflow {
        stat: SpellStat,
    },
    ComplexityExceeded {
        complexity: u32,
        limit: u32,
    },
    InvalidActionTarget {
        param: &'static str,
        found: &'static str,
    },
    SharedBody {
        other: Coord,
    },
    RepeatLimit {
        count: u32,
        limit: u32,
    },
}

impl CompileErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoTricks => ErrorCode::E0001,
            Self::UnsetParam { .. } => ErrorCode::E0002,
            Self::MissingSource { .. } => ErrorCode::E0003,
            Self::InvalidParam { .. } => ErrorCode::E0004,
            Self::SameSideParams { .. } => ErrorCode::E0005,
            Self::InfiniteLoop => ErrorCode::E0006,
            Self::NonPositiveInteger { .. } => ErrorCode::E0007,
            Self::NonPositiveValue { .. } => ErrorCode::E0008,
            Self::StatOverflow { .. } => ErrorCode::E0009,
            Self::ComplexityExceeded { .. } => ErrorCode::E0010,
            Self::InvalidActionTarget { .. } => ErrorCode::E0011,
            Self::SharedBody { .. } => ErrorCode::E0012,
            Self::RepeatLimit { .. } => ErrorCode::E0013,
        }
    }
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTricks => write!(f, "spell has no tricks"),
            Self::UnsetParam { param } => write!(f, "parameter `{param}` is not connected"),
            Self::MissingSource { param } => {
                write!(f, "parameter `{param}` is connected to an empty cell")
            }
            Self::InvalidParam {
                param,
                expected,
                found,
            } => write!(
                f,
                "parameter `{param}` expects {expected}, but is connected to {found}"
            ),
            Self::SameSideParams { side } => {
                write!(f, "two parameters are connected to the {side} side")
            }
            Self::InfiniteLoop => write!(f, "parameter connections form a loop"),
            Self::NonPositiveInteger { param } => {
                write!(f, "`{param}` must be a positive integer")
            }
            Self::NonPositiveValue { param } => write!(f, "`{param}` must be positive"),
            Self::StatOverflow { stat } => write!(f, "{stat} overflowed"),
            Self::ComplexityExceeded { complexity, limit } => {
                write!(f, "complexity {complexity} exceeds the limit of {limit}")
            }
            Self::InvalidActionTarget { param, found } => write!(
                f,
                "parameter `{param}` must point at a trick, found {found}"
            ),
            Self::SharedBody { other } => write!(
                f,
                "trick is already scheduled by the control piece at {other}"
            ),
            Self::RepeatLimit { count, limit } => {
                write!(f, "repeat count {count} exceeds the limit of {limit}")
            }
        }
    }
}

/// A compile error with the location of the offending piece.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub at: Option<Coord>,
    pub piece: Option<PieceKind>,
}

impl CompileError {
    /// An error not tied to any piece.
    pub fn new(kind: CompileErrorKind) -> Self {
        CompileError {
            kind,
            at: None,
            piece: None,
        }
    }

    /// An error raised by the piece at `at`.
    pub fn at(kind: CompileErrorKind, at: Coord, piece: PieceKind) -> Self {
        CompileError {
            kind,
            at: Some(at),
            piece: Some(piece),
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Convert to a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .at_opt(self.at);
        if let Some(piece) = self.piece {
            diag = diag.with_piece(piece.id());
        }
        match &self.kind {
            CompileErrorKind::NoTricks => {
                diag.with_suggestion("add a trick piece so the spell has an effect")
            }
            CompileErrorKind::InfiniteLoop => {
                diag.with_note("a piece cannot depend on its own output")
            }
            CompileErrorKind::NonPositiveInteger { .. } => diag.with_note(
                "the value must be known when the spell is compiled, e.g. a constant",
            ),
            CompileErrorKind::SameSideParams { .. } => {
                diag.with_suggestion("route one of the inputs through a connector")
            }
            _ => diag,
        }
    }
}

#[cfg(test)]
mod tests;
