//! Per-cast runtime state shared between a context and its derivations.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use spell_compile::{Action, CompiledSpell};
use spell_ir::{Value, GRID_SIZE};

use super::CustomValue;

const CELLS: usize = GRID_SIZE * GRID_SIZE;

#[derive(Debug)]
pub(crate) struct RuntimeState {
    /// Evaluated piece values, indexed by `Coord::index`. `None` means not
    /// evaluated yet in this execution.
    pub(crate) memo: [Option<Value>; CELLS],
    /// Pending actions; the next one to run is at the end.
    pub(crate) actions: Vec<Action>,
    pub(crate) stopped: bool,
    pub(crate) delay: u32,
    pub(crate) custom_data: FxHashMap<String, CustomValue>,
}

impl RuntimeState {
    pub(crate) fn fresh(spell: Option<&CompiledSpell>) -> Self {
        RuntimeState {
            memo: [None; CELLS],
            actions: spell
                .map(|spell| spell.actions().iter().rev().copied().collect())
                .unwrap_or_default(),
            stopped: false,
            delay: 0,
            custom_data: FxHashMap::default(),
        }
    }
}

/// Runtime state handle; cloning shares the state.
#[derive(Clone, Debug)]
pub(crate) struct SharedRuntime(Arc<Mutex<RuntimeState>>);

impl SharedRuntime {
    pub(crate) fn new(state: RuntimeState) -> Self {
        SharedRuntime(Arc::new(Mutex::new(state)))
    }

    /// Run `f` with the state locked. The lock is released before returning,
    /// so `f` must not evaluate pieces.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut RuntimeState) -> R) -> R {
        f(&mut self.0.lock())
    }

    pub(crate) fn ptr_eq(&self, other: &SharedRuntime) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
