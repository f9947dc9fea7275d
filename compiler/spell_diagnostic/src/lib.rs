//! Diagnostic system for spell compilation and casting.
//!
//! Every error the compiler or the interpreter can raise has:
//! - a stable error code for searchability (`E0xxx` compile, `E1xxx` runtime,
//!   `W0xxx` warnings)
//! - a clear message (what went wrong)
//! - the grid cell of the offending piece, when there is one
//! - optional notes and suggestions (why, and how to fix)
//!
//! Error kinds live next to the phase that raises them (`spell_compile`,
//! `spell_eval`); this crate only owns the shared vocabulary and rendering.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
