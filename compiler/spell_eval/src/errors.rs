//! Runtime errors.
//!
//! A runtime error aborts the rest of the current cast. Whether the caster
//! sees it depends on the spell's `errors_suppressed` flag.

use std::fmt;

use spell_diagnostic::{Diagnostic, ErrorCode};
use spell_ir::{Coord, PieceKind};

use crate::world::ToolCapabilities;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    NullTarget,
    ImmuneTarget,
    NoEquipment,
    MissingCapability {
        required: ToolCapabilities,
    },
    OutsideRadius,
    NullVector,
    /// A slot received a value of the wrong type. Type checking makes this
    /// reachable only through nullable selectors.
    UnexpectedValue {
        param: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

impl RuntimeErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NullTarget => ErrorCode::E1001,
            Self::ImmuneTarget => ErrorCode::E1002,
            Self::NoEquipment => ErrorCode::E1003,
            Self::MissingCapability { .. } => ErrorCode::E1004,
            Self::OutsideRadius => ErrorCode::E1005,
            Self::NullVector => ErrorCode::E1006,
            Self::UnexpectedValue { .. } => ErrorCode::E1007,
        }
    }
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullTarget => write!(f, "null target"),
            Self::ImmuneTarget => write!(f, "target is immune to spells"),
            Self::NoEquipment => write!(f, "caster has no casting device"),
            Self::MissingCapability { required } => {
                write!(f, "tool cannot harvest this block (needs {required:?})")
            }
            Self::OutsideRadius => write!(f, "target is outside the spell radius"),
            Self::NullVector => write!(f, "direction vector has zero length"),
            Self::UnexpectedValue {
                param,
                expected,
                found,
            } => write!(f, "parameter `{param}` expected {expected}, got {found}"),
        }
    }
}

/// A runtime error, with the piece that raised it when known.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub at: Option<Coord>,
    pub piece: Option<PieceKind>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind) -> Self {
        RuntimeError {
            kind,
            at: None,
            piece: None,
        }
    }

    /// Attach the executing piece, unless a location is already set.
    #[must_use]
    pub fn in_piece(mut self, at: Coord, piece: PieceKind) -> Self {
        if self.at.is_none() {
            self.at = Some(at);
            self.piece = Some(piece);
        }
        self
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .at_opt(self.at);
        if let Some(piece) = self.piece {
            diag = diag.with_piece(piece.id());
        }
        diag
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        RuntimeError::new(kind)
    }
}
