//! Feedback to the caster.
//!
//! Unsuppressed runtime errors and `trick_debug` output go through a
//! feedback handler. How the caster actually sees them is the host's
//! business; the handler only decides where the text goes:
//! - Log: `tracing` events (default)
//! - Buffer: captured for tests and the command line
//! - Silent: discarded
//!
//! Uses enum dispatch instead of trait objects; the set of sinks is closed.

use std::sync::Arc;

use parking_lot::Mutex;
use spell_ir::EntityRef;

use crate::errors::RuntimeError;

fn error_line(error: &RuntimeError) -> String {
    match error.at {
        Some(at) => format!("error[{}]: {} at {at}", error.code(), error.kind),
        None => format!("error[{}]: {}", error.code(), error.kind),
    }
}

/// Feedback handler that captures lines in a buffer.
pub struct BufferFeedback {
    buffer: Mutex<String>,
}

impl BufferFeedback {
    pub fn new() -> Self {
        BufferFeedback {
            buffer: Mutex::new(String::new()),
        }
    }

    fn push_line(&self, caster: EntityRef, line: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(&caster.to_string());
        buf.push_str(": ");
        buf.push_str(line);
        buf.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferFeedback {
    fn default() -> Self {
        Self::new()
    }
}

pub enum FeedbackHandler {
    /// Emit `tracing` events.
    Log,
    Buffer(BufferFeedback),
    Silent,
}

impl FeedbackHandler {
    /// Tell `caster` that their cast failed.
    pub fn report_error(&self, caster: EntityRef, error: &RuntimeError) {
        match self {
            Self::Log => tracing::warn!(%caster, code = %error.code(), at = ?error.at, "{}", error.kind),
            Self::Buffer(h) => h.push_line(caster, &error_line(error)),
            Self::Silent => {}
        }
    }

    /// Show a `trick_debug` message to `caster`.
    pub fn debug(&self, caster: EntityRef, message: &str) {
        match self {
            Self::Log => tracing::info!(%caster, "{message}"),
            Self::Buffer(h) => h.push_line(caster, message),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Log | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// A feedback handler shared between interpreters.
pub type SharedFeedback = Arc<FeedbackHandler>;

pub fn log_feedback() -> SharedFeedback {
    Arc::new(FeedbackHandler::Log)
}

pub fn buffer_feedback() -> SharedFeedback {
    Arc::new(FeedbackHandler::Buffer(BufferFeedback::new()))
}

pub fn silent_feedback() -> SharedFeedback {
    Arc::new(FeedbackHandler::Silent)
}

#[cfg(test)]
mod tests;
