//! `InterpreterBuilder` for creating Interpreter instances.

use super::Interpreter;
use crate::feedback::{log_feedback, SharedFeedback};
use crate::world::World;

/// Builder for an [`Interpreter`].
///
/// The world is required. Feedback defaults to `tracing` events.
pub struct InterpreterBuilder<'w> {
    world: &'w mut dyn World,
    feedback: Option<SharedFeedback>,
}

impl<'w> InterpreterBuilder<'w> {
    pub fn new(world: &'w mut dyn World) -> Self {
        InterpreterBuilder {
            world,
            feedback: None,
        }
    }

    /// Set where runtime errors and debug output go.
    #[must_use]
    pub fn feedback(mut self, handler: SharedFeedback) -> Self {
        self.feedback = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter<'w> {
        Interpreter {
            world: self.world,
            feedback: self.feedback.unwrap_or_else(log_feedback),
        }
    }
}
