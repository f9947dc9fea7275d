//! Command handlers for the `spellc` binary.
//!
//! Handlers return values instead of printing; `main.rs` owns stdout,
//! stderr and the exit code.

use crate::errors::CliError;

mod cast;
mod check;
mod explain;

pub use cast::{
    cast_spell, parse_cast_options, sandbox_world, CastOptions, CastReport, LoopReport, CASTER,
    TARGET_DUMMY,
};
pub use check::{check_grid, parse_check_options, summarize};
pub use explain::explain;

/// The numeric value of a `--flag=N` option.
fn flag_value(flag: &'static str, value: &str) -> Result<u32, CliError> {
    value.parse().map_err(|_| CliError::InvalidFlag {
        flag,
        value: value.to_owned(),
    })
}
