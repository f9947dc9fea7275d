//! Grid files: the JSON form of a [`SpellGrid`].
//!
//! ```json
//! { "pieces": [
//!     { "x": 0, "y": 0, "kind": "selector_caster" },
//!     { "x": 1, "y": 0, "kind": "trick_ignite",
//!       "params": { "target": "left", "time": "bottom" } },
//!     { "x": 1, "y": 1, "kind": "constant_number", "value": 3 }
//! ] }
//! ```
//!
//! Parameters left out of `params` stay disconnected.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use spell_diagnostic::{Diagnostic, ErrorCode};
use spell_ir::{lookup_piece, Coord, Piece, PieceKind, Side, SpellGrid, UnknownParam};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridFile {
    #[serde(default)]
    pieces: Vec<PieceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PieceEntry {
    x: usize,
    y: usize,
    kind: String,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    params: BTreeMap<String, Side>,
}

/// A grid file that could not be turned into a grid.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed grid file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("({x}, {y}) is outside the grid")]
    OutOfRange { x: usize, y: usize },
    #[error("unknown piece `{kind}` at {at}")]
    UnknownPiece { kind: String, at: Coord },
    #[error("{source} at {at}")]
    UnknownParam {
        #[source]
        source: UnknownParam,
        at: Coord,
    },
    #[error("`{kind}` at {at} does not take a value")]
    UnexpectedValue { kind: &'static str, at: Coord },
    #[error("more than one piece at {at}")]
    Duplicate { at: Coord },
}

impl LoadError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::E9001
    }

    fn location(&self) -> Option<Coord> {
        match self {
            LoadError::UnknownPiece { at, .. }
            | LoadError::UnknownParam { at, .. }
            | LoadError::UnexpectedValue { at, .. }
            | LoadError::Duplicate { at } => Some(*at),
            LoadError::Io { .. } | LoadError::Json(_) | LoadError::OutOfRange { .. } => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at_opt(self.location());
        match self {
            LoadError::UnknownPiece { .. } => {
                diag.with_note("piece ids look like `trick_ignite` or `selector_caster`")
            }
            LoadError::UnknownParam { source, .. } => {
                let names = lookup_piece(source.kind)
                    .map(|kind| {
                        kind.params()
                            .iter()
                            .map(|p| p.name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                if names.is_empty() {
                    diag.with_note(format!("`{}` takes no parameters", source.kind))
                } else {
                    diag.with_note(format!("`{}` takes: {names}", source.kind))
                }
            }
            _ => diag,
        }
    }
}

/// Parse a grid from JSON text.
pub fn parse_grid(text: &str) -> Result<SpellGrid, LoadError> {
    let file: GridFile = serde_json::from_str(text)?;
    let mut grid = SpellGrid::new();
    for entry in file.pieces {
        let at = Coord::new(entry.x, entry.y).ok_or(LoadError::OutOfRange {
            x: entry.x,
            y: entry.y,
        })?;
        let piece = entry.into_piece(at)?;
        if grid.set(at, piece).is_some() {
            return Err(LoadError::Duplicate { at });
        }
    }
    tracing::debug!(pieces = grid.len(), "loaded grid");
    Ok(grid)
}

/// Read and parse a grid file.
pub fn load_grid(path: &Path) -> Result<SpellGrid, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_grid(&text)
}

impl PieceEntry {
    fn into_piece(self, at: Coord) -> Result<Piece, LoadError> {
        let kind = lookup_piece(&self.kind).ok_or_else(|| LoadError::UnknownPiece {
            kind: self.kind.clone(),
            at,
        })?;
        let mut piece = match (kind, self.value) {
            (PieceKind::Number(_), value) => Piece::number(value.unwrap_or(0.0)),
            (_, None) => Piece::new(kind),
            (_, Some(_)) => {
                return Err(LoadError::UnexpectedValue {
                    kind: kind.id(),
                    at,
                })
            }
        };
        for (name, side) in &self.params {
            piece
                .set_param(name, *side)
                .map_err(|source| LoadError::UnknownParam { source, at })?;
        }
        Ok(piece)
    }
}
