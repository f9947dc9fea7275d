//! Spell Eval - executes a [`CompiledSpell`](spell_compile::CompiledSpell)
//! against a per-cast [`SpellContext`].
//!
//! # Architecture
//!
//! - [`SpellContext`]: who is casting, from where, and the per-cast runtime
//!   state (memoized piece values, the pending action stack, stop and delay
//!   flags, custom data)
//! - [`World`]: the host simulation; every query and every effect goes
//!   through it
//! - [`Interpreter`]: pops actions off the context's stack and dispatches
//!   them; [`Interpreter::safe_execute`] is the only entry point and never
//!   lets a runtime error escape
//! - [`FeedbackHandler`]: where user-visible errors and debug output go
//!
//! A cast is single-threaded and cooperative. It suspends only through the
//! delay counter: `safe_execute` returns [`CastStatus::Delayed`], the host
//! calls [`SpellContext::tick`] once per tick, and calls `safe_execute`
//! again once the delay reaches zero.
//!
//! # Tracing
//!
//! - `RUST_LOG=spell_eval=debug`: cast start and end, faults
//! - `RUST_LOG=spell_eval=trace`: every executed action and evaluated piece

mod context;
mod errors;
mod exec;
mod feedback;
mod interpreter;
pub mod sandbox;
mod world;

pub use context::{
    ContextBuilder, CustomKeyError, CustomValue, SpellContext, TargetSlotPolicy, MAX_DISTANCE,
};
pub use errors::{RuntimeError, RuntimeErrorKind};
pub use feedback::{
    buffer_feedback, log_feedback, silent_feedback, BufferFeedback, FeedbackHandler,
    SharedFeedback,
};
pub use interpreter::{CastStatus, Interpreter, InterpreterBuilder};
pub use world::{ItemHandle, ToolCapabilities, World, HOTBAR_SIZE, INVENTORY_SIZE};
