//! The action dispatch loop.

use std::fmt;

use spell_compile::{Action, CompiledSpell};

use crate::context::SpellContext;
use crate::errors::RuntimeError;
use crate::feedback::SharedFeedback;
use crate::world::World;

mod builder;

pub use builder::InterpreterBuilder;

/// Where a cast stands after [`Interpreter::safe_execute`] returns.
#[derive(Clone, PartialEq, Debug)]
pub enum CastStatus {
    /// Waiting on the delay counter; tick the context and execute again.
    Delayed { ticks: u32 },
    /// Finished: every action ran, the cast was stopped, or a suppressed
    /// error ended it.
    Stopped,
    /// Ended by a runtime error that was reported to the caster.
    Faulted(RuntimeError),
}

impl CastStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, CastStatus::Delayed { .. })
    }
}

impl fmt::Display for CastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastStatus::Delayed { ticks } => write!(f, "delayed for {ticks} ticks"),
            CastStatus::Stopped => write!(f, "stopped"),
            CastStatus::Faulted(err) => write!(f, "faulted: {err}"),
        }
    }
}

enum Step {
    Run(Action),
    Wait(u32),
    Done,
}

/// Runs compiled spells against one [`World`].
///
/// Create with [`InterpreterBuilder`].
pub struct Interpreter<'w> {
    pub(crate) world: &'w mut dyn World,
    pub(crate) feedback: SharedFeedback,
}

impl<'w> Interpreter<'w> {
    pub fn world(&self) -> &dyn World {
        &*self.world
    }

    pub fn feedback(&self) -> &SharedFeedback {
        &self.feedback
    }

    /// Run the context's spell until it finishes or has to wait.
    ///
    /// Never fails: runtime errors end the cast and are either reported to
    /// the caster through the feedback handler or, for spells with an
    /// `error_suppressor`, dropped. A context without a spell, or one that
    /// is already stopped, does nothing.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(caster = %ctx.caster(), loop_index = ctx.loop_index())
    )]
    pub fn safe_execute(&mut self, ctx: &SpellContext) -> CastStatus {
        let Some(spell) = ctx.spell().cloned() else {
            tracing::debug!("context has no spell");
            return CastStatus::Stopped;
        };

        match self.execute(ctx, &spell) {
            Ok(status) => status,
            Err(error) => {
                ctx.stop();
                if ctx.should_suppress_errors() {
                    tracing::debug!(code = %error.code(), "suppressed runtime error");
                    CastStatus::Stopped
                } else {
                    self.feedback.report_error(ctx.caster(), &error);
                    CastStatus::Faulted(error)
                }
            }
        }
    }

    fn execute(
        &mut self,
        ctx: &SpellContext,
        spell: &CompiledSpell,
    ) -> Result<CastStatus, RuntimeError> {
        loop {
            let step = ctx.with_runtime(|rt| {
                if rt.stopped {
                    Step::Done
                } else if rt.delay > 0 {
                    Step::Wait(rt.delay)
                } else {
                    rt.actions.pop().map_or(Step::Done, Step::Run)
                }
            });

            match step {
                Step::Run(action) => {
                    tracing::trace!(kind = %action.kind, at = %action.coord, "action");
                    self.run_action(ctx, spell, action)
                        .map_err(|err| err.in_piece(action.coord, action.kind))?;
                }
                Step::Wait(ticks) => return Ok(CastStatus::Delayed { ticks }),
                Step::Done => {
                    ctx.stop();
                    return Ok(CastStatus::Stopped);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
