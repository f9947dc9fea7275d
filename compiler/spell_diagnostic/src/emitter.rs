//! Terminal emitter.
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics to any `Write` sink.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn paint(&mut self, color: &str, text: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    /// Emit one diagnostic followed by a blank line.
    pub fn emit(&mut self, diag: &Diagnostic) -> io::Result<()> {
        let color = match diag.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.paint(color, &format!("{}[{}]", diag.severity, diag.code))?;
        self.paint(colors::BOLD, &format!(": {}", diag.message))?;
        writeln!(self.writer)?;

        match (diag.piece, diag.location) {
            (Some(piece), Some(at)) => writeln!(self.writer, "  --> {piece} at {at}")?,
            (None, Some(at)) => writeln!(self.writer, "  --> {at}")?,
            (Some(piece), None) => writeln!(self.writer, "  --> {piece}")?,
            (None, None) => {}
        }
        for note in &diag.notes {
            self.paint(colors::NOTE, "  = note")?;
            writeln!(self.writer, ": {note}")?;
        }
        for suggestion in &diag.suggestions {
            self.paint(colors::HELP, "  = help")?;
            writeln!(self.writer, ": {suggestion}")?;
        }
        writeln!(self.writer)
    }

    /// Emit a batch and a trailing summary line.
    pub fn emit_all(&mut self, diags: &[Diagnostic]) -> io::Result<()> {
        for diag in diags {
            self.emit(diag)?;
        }
        let errors = diags.iter().filter(|d| d.is_error()).count();
        if errors > 0 {
            let plural = if errors == 1 { "" } else { "s" };
            self.paint(colors::ERROR, "error")?;
            writeln!(self.writer, ": spell failed with {errors} error{plural}")?;
        }
        self.writer.flush()
    }

    /// Consume the emitter and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests;
