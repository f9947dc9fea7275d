//! Spellc - command line front end for the spell compiler and interpreter.
//!
//! The binary in `main.rs` parses arguments; everything it runs lives here
//! so that integration tests can drive the same code:
//! - [`grid_file`]: JSON grid files to [`SpellGrid`](spell_ir::SpellGrid)
//! - [`commands`]: `check`, `cast` and `explain`
//! - [`init_tracing`]: `RUST_LOG`-driven subscriber setup

pub mod commands;
mod errors;
pub mod grid_file;
mod tracing_setup;

pub use errors::CliError;
pub use grid_file::{load_grid, parse_grid, LoadError};
pub use tracing_setup::init_tracing;
