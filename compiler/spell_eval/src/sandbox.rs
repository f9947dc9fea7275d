//! An in-memory [`World`] that records every effect.
//!
//! Used by the command line `cast` command and by tests. Entities, items and
//! block requirements are declared up front with the `with_*` builders;
//! effects are appended to an event log instead of simulating anything,
//! except that motion moves the entity.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;
use spell_ir::{EntityRef, Vector3};

use crate::world::{ItemHandle, ToolCapabilities, World};

/// One effect applied to the sandbox.
#[derive(Clone, PartialEq, Debug)]
pub enum WorldEvent {
    Ignited { entity: EntityRef, ticks: u32 },
    Moved { entity: EntityRef, motion: Vector3 },
    Exploded { position: Vector3, power: f64 },
    BlockBroken { position: Vector3, tool: ItemHandle },
    BlockPlaced { position: Vector3, slot: usize },
}

impl fmt::Display for WorldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignited { entity, ticks } => write!(f, "ignite {entity} for {ticks} ticks"),
            Self::Moved { entity, motion } => write!(f, "move {entity} by {motion}"),
            Self::Exploded { position, power } => {
                write!(f, "explosion at {position} with power {power}")
            }
            Self::BlockBroken { position, tool } => write!(f, "break block at {position} with {tool}"),
            Self::BlockPlaced { position, slot } => {
                write!(f, "place block at {position} from slot {slot}")
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct SandboxEntity {
    position: Vector3,
    immune: bool,
}

#[derive(Default, Debug)]
pub struct SandboxWorld {
    entities: FxHashMap<EntityRef, SandboxEntity>,
    /// Casting device and the inventory slot holding it, per caster.
    equipment: FxHashMap<EntityRef, (ItemHandle, usize)>,
    selected: FxHashMap<EntityRef, usize>,
    tools: FxHashMap<ItemHandle, ToolCapabilities>,
    blocks: Vec<(Vector3, ToolCapabilities)>,
    events: Vec<WorldEvent>,
    position_queries: RefCell<FxHashMap<EntityRef, usize>>,
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entity(mut self, entity: EntityRef, position: Vector3) -> Self {
        self.entities.insert(
            entity,
            SandboxEntity {
                position,
                immune: false,
            },
        );
        self
    }

    #[must_use]
    pub fn with_immune_entity(mut self, entity: EntityRef, position: Vector3) -> Self {
        self.entities.insert(
            entity,
            SandboxEntity {
                position,
                immune: true,
            },
        );
        self
    }

    /// Give `caster` a casting device held in inventory slot `slot`.
    #[must_use]
    pub fn with_equipment(mut self, caster: EntityRef, item: ItemHandle, slot: usize) -> Self {
        self.equipment.insert(caster, (item, slot));
        self
    }

    #[must_use]
    pub fn with_selected_slot(mut self, caster: EntityRef, slot: usize) -> Self {
        self.selected.insert(caster, slot);
        self
    }

    #[must_use]
    pub fn with_tool(mut self, item: ItemHandle, capabilities: ToolCapabilities) -> Self {
        self.tools.insert(item, capabilities);
        self
    }

    /// Require `capabilities` to break the block at exactly `position`.
    #[must_use]
    pub fn with_block(mut self, position: Vector3, capabilities: ToolCapabilities) -> Self {
        self.blocks.push((position, capabilities));
        self
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// How many times the position of `entity` has been queried.
    pub fn position_queries(&self, entity: EntityRef) -> usize {
        self.position_queries
            .borrow()
            .get(&entity)
            .copied()
            .unwrap_or(0)
    }
}

impl World for SandboxWorld {
    fn position(&self, entity: EntityRef) -> Option<Vector3> {
        *self.position_queries.borrow_mut().entry(entity).or_insert(0) += 1;
        self.entities.get(&entity).map(|e| e.position)
    }

    fn is_immune(&self, entity: EntityRef) -> bool {
        self.entities.get(&entity).is_some_and(|e| e.immune)
    }

    fn equipment(&self, caster: EntityRef) -> Option<ItemHandle> {
        self.equipment.get(&caster).map(|(item, _)| *item)
    }

    fn equipment_slot(&self, caster: EntityRef) -> Option<usize> {
        self.equipment.get(&caster).map(|(_, slot)| *slot)
    }

    fn selected_slot(&self, caster: EntityRef) -> usize {
        self.selected.get(&caster).copied().unwrap_or(0)
    }

    fn tool_capabilities(&self, item: ItemHandle) -> ToolCapabilities {
        self.tools.get(&item).copied().unwrap_or_default()
    }

    fn block_requirement(&self, position: Vector3) -> ToolCapabilities {
        self.blocks
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, caps)| *caps)
            .unwrap_or_default()
    }

    fn ignite(&mut self, entity: EntityRef, ticks: u32) {
        self.events.push(WorldEvent::Ignited { entity, ticks });
    }

    fn add_motion(&mut self, entity: EntityRef, motion: Vector3) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.position = e.position + motion;
        }
        self.events.push(WorldEvent::Moved { entity, motion });
    }

    fn explode(&mut self, position: Vector3, power: f64) {
        self.events.push(WorldEvent::Exploded { position, power });
    }

    fn break_block(&mut self, position: Vector3, tool: ItemHandle) {
        self.events.push(WorldEvent::BlockBroken { position, tool });
    }

    fn place_block(&mut self, position: Vector3, slot: usize) {
        self.events.push(WorldEvent::BlockPlaced { position, slot });
    }
}
