//! The `check` command: compile a grid and report its stats.

use std::sync::Arc;

use spell_compile::{compile, CompiledSpell, CompilerConfig};
use spell_ir::{SpellGrid, SpellStat};

use super::flag_value;
use crate::errors::CliError;

/// Parse `check` arguments: one grid path plus `--max-complexity=N` and
/// `--max-repeat=N`.
pub fn parse_check_options(
    args: &[String],
) -> Result<(Option<String>, CompilerConfig), CliError> {
    let mut config = CompilerConfig::default();
    let mut path = None;
    for arg in args {
        if let Some(value) = arg.strip_prefix("--max-complexity=") {
            config = config.with_max_complexity(flag_value("--max-complexity", value)?);
        } else if let Some(value) = arg.strip_prefix("--max-repeat=") {
            config = config.with_max_repeat(flag_value("--max-repeat", value)?);
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownOption(arg.clone()));
        } else if path.is_none() {
            path = Some(arg.clone());
        }
    }
    Ok((path, config))
}

pub fn check_grid(grid: SpellGrid, config: &CompilerConfig) -> Result<CompiledSpell, CliError> {
    Ok(compile(&Arc::new(grid), config)?)
}

/// One line describing a compiled spell.
pub fn summarize(spell: &CompiledSpell) -> String {
    let meta = spell.metadata();
    let stats = SpellStat::ALL
        .iter()
        .map(|stat| format!("{stat} {}", meta.stat(*stat)))
        .collect::<Vec<_>>()
        .join(", ");
    let suppressed = if meta.errors_suppressed() {
        ", errors suppressed"
    } else {
        ""
    };
    let actions = spell.actions().len();
    let plural = if actions == 1 { "" } else { "s" };
    format!("{actions} action{plural}; {stats}{suppressed}")
}
