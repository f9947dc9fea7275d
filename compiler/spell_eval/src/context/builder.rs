//! `ContextBuilder` for creating contexts with optional cast data.

use std::sync::Arc;

use spell_compile::CompiledSpell;
use spell_ir::EntityRef;

use super::runtime::{RuntimeState, SharedRuntime};
use super::{SpellContext, TargetSlotPolicy};
use crate::world::ItemHandle;

/// Builder for a fresh [`SpellContext`].
///
/// Only the caster is required. The focal point defaults to the caster.
pub struct ContextBuilder {
    caster: EntityRef,
    focal_point: Option<EntityRef>,
    spell: Option<Arc<CompiledSpell>>,
    loop_index: u32,
    tool: Option<ItemHandle>,
    attacked_entity: Option<EntityRef>,
    attacking_entity: Option<EntityRef>,
    damage_taken: f64,
    target_slot: i32,
    slot_policy: TargetSlotPolicy,
}

impl ContextBuilder {
    pub fn new(caster: EntityRef) -> Self {
        ContextBuilder {
            caster,
            focal_point: None,
            spell: None,
            loop_index: 0,
            tool: None,
            attacked_entity: None,
            attacking_entity: None,
            damage_taken: 0.0,
            target_slot: 1,
            slot_policy: TargetSlotPolicy::default(),
        }
    }

    #[must_use]
    pub fn focal_point(mut self, entity: EntityRef) -> Self {
        self.focal_point = Some(entity);
        self
    }

    #[must_use]
    pub fn spell(mut self, spell: Arc<CompiledSpell>) -> Self {
        self.spell = Some(spell);
        self
    }

    #[must_use]
    pub fn loop_index(mut self, index: u32) -> Self {
        self.loop_index = index;
        self
    }

    /// The item the spell was cast through, for harvesting.
    #[must_use]
    pub fn tool(mut self, tool: ItemHandle) -> Self {
        self.tool = Some(tool);
        self
    }

    /// The entity struck when the spell was cast from a weapon.
    #[must_use]
    pub fn attacked_entity(mut self, entity: EntityRef) -> Self {
        self.attacked_entity = Some(entity);
        self
    }

    /// The attacker and damage when the spell was cast from armour.
    #[must_use]
    pub fn attacked_by(mut self, attacker: EntityRef, damage: f64) -> Self {
        self.attacking_entity = Some(attacker);
        self.damage_taken = damage;
        self
    }

    #[must_use]
    pub fn target_slot(mut self, slot: i32, policy: TargetSlotPolicy) -> Self {
        self.target_slot = slot;
        self.slot_policy = policy;
        self
    }

    /// Build the context, with fresh runtime state.
    pub fn build(self) -> SpellContext {
        let runtime = SharedRuntime::new(RuntimeState::fresh(self.spell.as_deref()));
        SpellContext {
            caster: self.caster,
            focal_point: self.focal_point.unwrap_or(self.caster),
            spell: self.spell,
            loop_index: self.loop_index,
            tool: self.tool,
            attacked_entity: self.attacked_entity,
            attacking_entity: self.attacking_entity,
            damage_taken: self.damage_taken,
            target_slot: self.target_slot,
            slot_policy: self.slot_policy,
            runtime,
        }
    }
}
