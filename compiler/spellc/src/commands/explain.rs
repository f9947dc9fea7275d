//! The `explain` command: documentation for an error code.

use spell_diagnostic::{ErrorCode, ErrorDocs};

use crate::errors::CliError;

pub fn explain(code: &str) -> Result<&'static str, CliError> {
    ErrorCode::parse(code)
        .and_then(ErrorDocs::get)
        .ok_or_else(|| CliError::UnknownCode(code.to_owned()))
}
