//! Spell Compile - turns a [`SpellGrid`] into an executable [`CompiledSpell`].
//!
//! # Architecture
//!
//! Compilation runs a fixed sequence of passes over the grid and aborts on
//! the first error; no partial artifact is ever produced.
//!
//! 1. `resolve`: bind every parameter slot to its producing cell (following
//!    connectors), fill defaults, and type-check each connection
//! 2. `order`: reject dependency cycles, assign trick bodies to control
//!    pieces, and emit the action list in reading order
//! 3. `stats`: fold static values, run per-piece validation, and accumulate
//!    [`SpellMetadata`]
//!
//! Compilation is pure and deterministic. [`SpellCache`] memoizes it by grid
//! content and is safe to share across threads. [`unused_pieces`] is a
//! separate pass over a compiled spell that reports warnings.
//!
//! # Tracing
//!
//! - `RUST_LOG=spell_compile=debug`: one span per compilation, cache misses
//! - `RUST_LOG=spell_compile=trace`: cache hits and evictions

mod artifact;
mod cache;
mod compiler;
mod config;
mod errors;
mod lint;

pub use artifact::{Action, CompiledPiece, CompiledSpell, Input, SpellMetadata};
pub use cache::{SpellCache, DEFAULT_CACHE_CAPACITY};
pub use compiler::compile;
pub use config::CompilerConfig;
pub use errors::{CompileError, CompileErrorKind};
pub use lint::unused_pieces;
