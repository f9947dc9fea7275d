//! Per-cast execution context.
//!
//! A context has two halves:
//! - cast data (caster, focal point, spell, loop index, and the optional
//!   tool, combat and slot data), owned by each context value
//! - runtime state (memoized values, action stack, stop and delay flags,
//!   custom data), shared between a context and every context derived
//!   from it
//!
//! [`SpellContext::derive`] is the only way to get a second handle on the
//! same runtime state. Its `with_*` overrides change cast data on the
//! derived copy only.

use std::fmt;
use std::sync::Arc;

use spell_compile::CompiledSpell;
use spell_ir::{EntityRef, Value, Vector3};

use crate::errors::{RuntimeError, RuntimeErrorKind};
use crate::world::{ItemHandle, World, HOTBAR_SIZE, INVENTORY_SIZE};

mod builder;
mod runtime;

pub use builder::ContextBuilder;
pub(crate) use runtime::RuntimeState;
use runtime::SharedRuntime;

/// Maximum distance from the focal point a spell can affect, inclusive.
pub const MAX_DISTANCE: f64 = 32.0;

/// How the logical target slot maps to an inventory slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TargetSlotPolicy {
    /// Absolute inventory slot.
    Custom,
    /// Hotbar slot relative to the casting device, or to the selected slot
    /// when the device is not on the hotbar.
    #[default]
    Shifted,
    /// Hotbar slot counted from slot 1.
    Fixed,
}

/// Values collaborators may stash in a context's custom data.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum CustomValue {
    Number(f64),
    Vector(Vector3),
    Entity(EntityRef),
    Flag(bool),
}

/// Custom data keys must be namespaced as `namespace:key`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("custom data key `{0}` must have the form `namespace:key`")]
pub struct CustomKeyError(pub String);

fn check_key(key: &str) -> Result<(), CustomKeyError> {
    match key.split_once(':') {
        Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => Ok(()),
        _ => Err(CustomKeyError(key.to_owned())),
    }
}

#[derive(Debug)]
pub struct SpellContext {
    caster: EntityRef,
    focal_point: EntityRef,
    spell: Option<Arc<CompiledSpell>>,
    loop_index: u32,
    tool: Option<ItemHandle>,
    attacked_entity: Option<EntityRef>,
    attacking_entity: Option<EntityRef>,
    damage_taken: f64,
    target_slot: i32,
    slot_policy: TargetSlotPolicy,
    runtime: SharedRuntime,
}

impl SpellContext {
    /// A fresh context for one cast.
    pub fn new(
        caster: EntityRef,
        focal_point: EntityRef,
        spell: Option<Arc<CompiledSpell>>,
        loop_index: u32,
    ) -> Self {
        let mut builder = ContextBuilder::new(caster)
            .focal_point(focal_point)
            .loop_index(loop_index);
        if let Some(spell) = spell {
            builder = builder.spell(spell);
        }
        builder.build()
    }

    pub fn builder(caster: EntityRef) -> ContextBuilder {
        ContextBuilder::new(caster)
    }

    /// A copy sharing this context's runtime state.
    #[must_use]
    pub fn derive(&self) -> Self {
        SpellContext {
            caster: self.caster,
            focal_point: self.focal_point,
            spell: self.spell.clone(),
            loop_index: self.loop_index,
            tool: self.tool,
            attacked_entity: self.attacked_entity,
            attacking_entity: self.attacking_entity,
            damage_taken: self.damage_taken,
            target_slot: self.target_slot,
            slot_policy: self.slot_policy,
            runtime: self.runtime.clone(),
        }
    }

    /// The context for the next loop-cast repetition: same cast data, loop
    /// index plus one, fresh runtime state.
    #[must_use]
    pub fn next_loop(&self) -> Self {
        let mut next = self.derive();
        next.loop_index = self.loop_index.saturating_add(1);
        next.runtime = SharedRuntime::new(RuntimeState::fresh(self.spell.as_deref()));
        next
    }

    #[must_use]
    pub fn with_focal_point(mut self, entity: EntityRef) -> Self {
        self.focal_point = entity;
        self
    }

    #[must_use]
    pub fn with_attacked_entity(mut self, entity: Option<EntityRef>) -> Self {
        self.attacked_entity = entity;
        self
    }

    #[must_use]
    pub fn with_tool(mut self, tool: Option<ItemHandle>) -> Self {
        self.tool = tool;
        self
    }

    #[must_use]
    pub fn with_target_slot(mut self, slot: i32, policy: TargetSlotPolicy) -> Self {
        self.target_slot = slot;
        self.slot_policy = policy;
        self
    }

    #[inline]
    pub fn caster(&self) -> EntityRef {
        self.caster
    }

    #[inline]
    pub fn focal_point(&self) -> EntityRef {
        self.focal_point
    }

    pub fn spell(&self) -> Option<&Arc<CompiledSpell>> {
        self.spell.as_ref()
    }

    #[inline]
    pub fn loop_index(&self) -> u32 {
        self.loop_index
    }

    pub fn tool(&self) -> Option<ItemHandle> {
        self.tool
    }

    pub fn attacked_entity(&self) -> Option<EntityRef> {
        self.attacked_entity
    }

    pub fn attacking_entity(&self) -> Option<EntityRef> {
        self.attacking_entity
    }

    pub fn damage_taken(&self) -> f64 {
        self.damage_taken
    }

    /// Whether this context has a spell to run.
    pub fn is_valid(&self) -> bool {
        self.spell.is_some()
    }

    pub fn should_suppress_errors(&self) -> bool {
        self.spell
            .as_ref()
            .is_some_and(|spell| spell.metadata().errors_suppressed())
    }

    /// Whether `point` is within [`MAX_DISTANCE`] of the focal point.
    pub fn is_in_radius(&self, world: &dyn World, point: Vector3) -> bool {
        world
            .position(self.focal_point)
            .is_some_and(|focus| focus.distance(point) <= MAX_DISTANCE)
    }

    /// Entity form of [`SpellContext::is_in_radius`]. The focal point and
    /// the caster are always in radius; a missing entity never is.
    pub fn is_entity_in_radius(&self, world: &dyn World, entity: Option<EntityRef>) -> bool {
        let Some(entity) = entity else {
            return false;
        };
        if entity == self.focal_point || entity == self.caster {
            return true;
        }
        world
            .position(entity)
            .is_some_and(|pos| self.is_in_radius(world, pos))
    }

    /// Check that `entity` can be the target of an effect.
    pub fn verify_entity(
        &self,
        world: &dyn World,
        entity: Option<EntityRef>,
    ) -> Result<EntityRef, RuntimeError> {
        let entity = entity.ok_or(RuntimeErrorKind::NullTarget)?;
        if world.is_immune(entity) {
            return Err(RuntimeErrorKind::ImmuneTarget.into());
        }
        Ok(entity)
    }

    /// Resolve the logical target slot to an inventory slot.
    pub fn target_slot(&self, world: &dyn World) -> Result<usize, RuntimeError> {
        let offset = i64::from(self.target_slot);
        match self.slot_policy {
            TargetSlotPolicy::Custom => Ok(wrap_slot(0, offset, INVENTORY_SIZE)),
            TargetSlotPolicy::Shifted => {
                let device = world
                    .equipment_slot(self.caster)
                    .ok_or(RuntimeErrorKind::NoEquipment)?;
                let base = if device < HOTBAR_SIZE {
                    device
                } else {
                    world.selected_slot(self.caster)
                };
                Ok(wrap_slot(base, offset, HOTBAR_SIZE))
            }
            TargetSlotPolicy::Fixed => Ok(wrap_slot(0, offset - 1, HOTBAR_SIZE)),
        }
    }

    /// The item to harvest with: the bound tool if it can harvest anything,
    /// otherwise the caster's casting device.
    pub fn harvest_tool(&self, world: &dyn World) -> Result<ItemHandle, RuntimeError> {
        if let Some(tool) = self.tool {
            if !world.tool_capabilities(tool).is_empty() {
                return Ok(tool);
            }
        }
        world
            .equipment(self.caster)
            .ok_or_else(|| RuntimeErrorKind::NoEquipment.into())
    }

    /// Stop the cast at the next action boundary.
    pub fn stop(&self) {
        self.runtime.with(|rt| rt.stopped = true);
    }

    pub fn is_stopped(&self) -> bool {
        self.runtime.with(|rt| rt.stopped)
    }

    /// Ticks left before the cast may resume.
    pub fn delay(&self) -> u32 {
        self.runtime.with(|rt| rt.delay)
    }

    /// Advance one tick. Returns whether the cast may resume.
    pub fn tick(&self) -> bool {
        self.runtime.with(|rt| {
            rt.delay = rt.delay.saturating_sub(1);
            rt.delay == 0 && !rt.stopped
        })
    }

    /// The memoized value of the piece at `index`, if evaluated this cast.
    pub(crate) fn memo(&self, index: usize) -> Option<Value> {
        self.runtime.with(|rt| rt.memo[index])
    }

    pub(crate) fn set_memo(&self, index: usize, value: Value) {
        self.runtime.with(|rt| rt.memo[index] = Some(value));
    }

    /// Run `f` with the runtime state locked.
    pub(crate) fn with_runtime<R>(&self, f: impl FnOnce(&mut RuntimeState) -> R) -> R {
        self.runtime.with(f)
    }

    pub fn custom_data(&self, key: &str) -> Option<CustomValue> {
        self.runtime.with(|rt| rt.custom_data.get(key).copied())
    }

    /// Store `value` under a namespaced key, returning the previous value.
    pub fn set_custom_data(
        &self,
        key: &str,
        value: CustomValue,
    ) -> Result<Option<CustomValue>, CustomKeyError> {
        check_key(key)?;
        Ok(self
            .runtime
            .with(|rt| rt.custom_data.insert(key.to_owned(), value)))
    }

    pub fn remove_custom_data(&self, key: &str) -> Option<CustomValue> {
        self.runtime.with(|rt| rt.custom_data.remove(key))
    }

    /// Whether `other` shares this context's runtime state.
    pub fn shares_runtime_with(&self, other: &SpellContext) -> bool {
        self.runtime.ptr_eq(&other.runtime)
    }
}

impl fmt::Display for SpellContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cast by {} at {} (loop {})",
            self.caster, self.focal_point, self.loop_index
        )
    }
}

/// `(base + offset) mod size`, always in `0..size`.
#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "slot sizes are small and rem_euclid is non-negative"
)]
fn wrap_slot(base: usize, offset: i64, size: usize) -> usize {
    (((base % size) as i64) + offset).rem_euclid(size as i64) as usize
}
