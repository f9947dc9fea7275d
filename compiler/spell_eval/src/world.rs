//! The host world the interpreter reads from and acts on.

use std::fmt;

use bitflags::bitflags;
use spell_ir::{EntityRef, Vector3};

/// Slots in a caster's inventory.
pub const INVENTORY_SIZE: usize = 36;

/// Slots in the hotbar, the first `HOTBAR_SIZE` inventory slots.
pub const HOTBAR_SIZE: usize = 9;

/// An opaque handle to an item owned by the host.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ItemHandle(pub u64);

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

bitflags! {
    /// What an item can harvest, and what a block needs to be harvested.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ToolCapabilities: u8 {
        const PICKAXE = 1;
        const AXE = 1 << 1;
        const SHOVEL = 1 << 2;
    }
}

/// The host simulation.
///
/// Queries take `&self` and must not have side effects; the interpreter may
/// call them any number of times. Effect hooks take `&mut self`; each trick
/// calls exactly one of them, after all of its checks have passed.
pub trait World {
    /// Current position of `entity`, or `None` if it no longer exists.
    fn position(&self, entity: EntityRef) -> Option<Vector3>;

    /// Whether `entity` ignores spell effects.
    fn is_immune(&self, entity: EntityRef) -> bool;

    /// The casting device bound to `caster`, if any.
    fn equipment(&self, caster: EntityRef) -> Option<ItemHandle>;

    /// Inventory slot holding the caster's casting device, if any.
    fn equipment_slot(&self, caster: EntityRef) -> Option<usize>;

    /// The caster's currently selected hotbar slot.
    fn selected_slot(&self, caster: EntityRef) -> usize;

    fn tool_capabilities(&self, item: ItemHandle) -> ToolCapabilities;

    /// Capabilities a tool needs to break the block at `position`.
    fn block_requirement(&self, position: Vector3) -> ToolCapabilities;

    fn ignite(&mut self, entity: EntityRef, ticks: u32);

    fn add_motion(&mut self, entity: EntityRef, motion: Vector3);

    fn explode(&mut self, position: Vector3, power: f64);

    fn break_block(&mut self, position: Vector3, tool: ItemHandle);

    /// Place the block held in inventory slot `slot`.
    fn place_block(&mut self, position: Vector3, slot: usize);
}
