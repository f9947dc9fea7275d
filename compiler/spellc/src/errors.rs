//! Errors surfaced by the command line.

use spell_compile::CompileError;
use spell_diagnostic::{Diagnostic, ErrorCode};

use crate::grid_file::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidFlag { flag: &'static str, value: String },
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("unknown error code `{0}`")]
    UnknownCode(String),
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Compile(err) => err.code(),
            CliError::Load(_)
            | CliError::InvalidFlag { .. }
            | CliError::UnknownOption(_)
            | CliError::UnknownCode(_) => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CliError::Load(err) => err.to_diagnostic(),
            CliError::Compile(err) => err.to_diagnostic(),
            CliError::UnknownCode(_) => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_note("codes look like E0001 (compile) or E1001 (runtime)"),
            CliError::InvalidFlag { .. } | CliError::UnknownOption(_) => {
                Diagnostic::error(self.code()).with_message(self.to_string())
            }
        }
    }
}
