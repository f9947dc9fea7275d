//! The `cast` command: run a compiled spell in the sandbox world.

use std::fmt;
use std::sync::Arc;

use spell_compile::CompiledSpell;
use spell_eval::sandbox::{SandboxWorld, WorldEvent};
use spell_eval::{
    buffer_feedback, CastStatus, InterpreterBuilder, ItemHandle, SharedFeedback, SpellContext,
    ToolCapabilities,
};
use spell_ir::{EntityRef, Vector3};

use super::flag_value;
use crate::errors::CliError;

/// The entity casting in the sandbox, at the origin.
pub const CASTER: EntityRef = EntityRef(1);

/// An entity standing in front of the caster, bound as the attacked entity.
pub const TARGET_DUMMY: EntityRef = EntityRef(2);

const CASTING_DEVICE: ItemHandle = ItemHandle(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CastOptions {
    /// Number of loop casts, with loop indices `0..loops`.
    pub loops: u32,
    /// Ticks a single loop may spend delayed before it is abandoned.
    pub max_ticks: u32,
}

impl Default for CastOptions {
    fn default() -> Self {
        CastOptions {
            loops: 1,
            max_ticks: 200,
        }
    }
}

/// Parse `cast` arguments: one grid path plus `--loops=N` and `--max-ticks=N`.
pub fn parse_cast_options(args: &[String]) -> Result<(Option<String>, CastOptions), CliError> {
    let mut options = CastOptions::default();
    let mut path = None;
    for arg in args {
        if let Some(value) = arg.strip_prefix("--loops=") {
            options.loops = flag_value("--loops", value)?;
        } else if let Some(value) = arg.strip_prefix("--max-ticks=") {
            options.max_ticks = flag_value("--max-ticks", value)?;
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownOption(arg.clone()));
        } else if path.is_none() {
            path = Some(arg.clone());
        }
    }
    Ok((path, options))
}

/// What happened during one loop cast.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopReport {
    pub loop_index: u32,
    pub status: CastStatus,
    /// Ticks spent waiting on delays.
    pub ticks: u32,
    pub events: Vec<WorldEvent>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CastReport {
    pub loops: Vec<LoopReport>,
    /// Everything written to the caster: debug output and reported errors.
    pub feedback: String,
}

impl CastReport {
    pub fn faulted(&self) -> bool {
        self.loops
            .iter()
            .any(|l| matches!(l.status, CastStatus::Faulted(_)))
    }
}

impl fmt::Display for CastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.loops {
            write!(f, "loop {}: {}", report.loop_index, report.status)?;
            if report.ticks > 0 {
                write!(f, " after {} ticks", report.ticks)?;
            }
            writeln!(f)?;
            for event in &report.events {
                writeln!(f, "  {event}")?;
            }
        }
        if !self.feedback.is_empty() {
            writeln!(f, "feedback:")?;
            for line in self.feedback.lines() {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}

/// The world `cast` runs in: the caster holding a device that can harvest
/// anything, and a target dummy three blocks away.
pub fn sandbox_world() -> SandboxWorld {
    SandboxWorld::new()
        .with_entity(CASTER, Vector3::ZERO)
        .with_entity(TARGET_DUMMY, Vector3::new(3.0, 0.0, 0.0))
        .with_equipment(CASTER, CASTING_DEVICE, 0)
        .with_tool(CASTING_DEVICE, ToolCapabilities::all())
}

#[tracing::instrument(level = "debug", skip_all, fields(loops = options.loops))]
pub fn cast_spell(spell: Arc<CompiledSpell>, options: CastOptions) -> CastReport {
    let mut world = sandbox_world();
    let feedback = buffer_feedback();
    let mut ctx = SpellContext::builder(CASTER)
        .spell(spell)
        .attacked_entity(TARGET_DUMMY)
        .build();

    let mut loops = Vec::new();
    for loop_index in 0..options.loops {
        if loop_index > 0 {
            ctx = ctx.next_loop();
        }
        let (status, ticks) = run_loop(&mut world, &feedback, &ctx, options.max_ticks);
        loops.push(LoopReport {
            loop_index,
            status,
            ticks,
            events: world.take_events(),
        });
    }

    CastReport {
        loops,
        feedback: feedback.get_output(),
    }
}

/// Execute, ticking through delays until the cast finishes or runs out of
/// ticks.
fn run_loop(
    world: &mut SandboxWorld,
    feedback: &SharedFeedback,
    ctx: &SpellContext,
    max_ticks: u32,
) -> (CastStatus, u32) {
    let mut interpreter = InterpreterBuilder::new(world)
        .feedback(Arc::clone(feedback))
        .build();
    let mut status = interpreter.safe_execute(ctx);
    let mut ticks = 0;
    while !status.is_finished() && ticks < max_ticks {
        ticks += 1;
        if ctx.tick() {
            status = interpreter.safe_execute(ctx);
        }
    }
    if !status.is_finished() {
        tracing::debug!(max_ticks, "cast still delayed, giving up");
    }
    (status, ticks)
}
