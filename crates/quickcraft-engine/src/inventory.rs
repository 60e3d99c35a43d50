//! Inventory seam and a concrete slot-based player inventory.

use quickcraft_common::MAX_STACK_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::ItemStack;

/// Inventory error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// Slot index out of range
    #[error("Slot {slot} out of range: inventory has {size} slots")]
    SlotOutOfRange {
        /// Requested slot
        slot: usize,
        /// Inventory size
        size: usize,
    },
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Source of live inventory contents.
///
/// The engine reads a point-in-time copy through [`slots`](Self::slots),
/// mutates the copy while matching ingredients, and commits it back through
/// [`set_slots`](Self::set_slots) only after a fully successful craft. A
/// failed craft never calls `set_slots`, so partial consumption is never
/// observable on the live inventory.
pub trait InventorySource {
    /// Returns a copy of the current slot contents.
    fn slots(&self) -> Vec<Option<ItemStack>>;

    /// Replaces the slot contents with a mutated snapshot.
    fn set_slots(&mut self, slots: Vec<Option<ItemStack>>);
}

/// A fixed-size, slot-based inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInventory {
    slots: Vec<Option<ItemStack>>,
}

impl PlayerInventory {
    /// Creates an empty inventory with the given number of slots.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Creates an inventory from existing slot contents.
    #[must_use]
    pub fn from_slots(slots: Vec<Option<ItemStack>>) -> Self {
        Self { slots }
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Returns the stack in a slot, if any.
    pub fn slot(&self, index: usize) -> InventoryResult<Option<&ItemStack>> {
        self.slots
            .get(index)
            .map(Option::as_ref)
            .ok_or(InventoryError::SlotOutOfRange {
                slot: index,
                size: self.slots.len(),
            })
    }

    /// Places a stack directly into a slot, replacing its contents.
    pub fn set_slot(&mut self, index: usize, stack: Option<ItemStack>) -> InventoryResult<()> {
        let size = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::SlotOutOfRange { slot: index, size })?;
        *slot = stack;
        Ok(())
    }

    /// Counts items matching a predicate across all slots.
    #[must_use]
    pub fn count_matching(&self, mut predicate: impl FnMut(&ItemStack) -> bool) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| predicate(stack))
            .map(|stack| stack.quantity)
            .sum()
    }

    /// Adds a stack to the inventory, merging into existing stacks of the
    /// same material and variant first, then filling empty slots.
    ///
    /// Returns the portion that did not fit, if any; the caller decides what
    /// to do with the overflow (typically drop it on the ground).
    pub fn add(&mut self, stack: ItemStack) -> Option<ItemStack> {
        let mut remaining = stack.quantity;

        // Top up existing stacks of the same identity.
        for slot in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if slot.material != stack.material || slot.variant != stack.variant {
                continue;
            }
            let room = MAX_STACK_SIZE.saturating_sub(slot.quantity);
            let moved = room.min(remaining);
            slot.quantity += moved;
            remaining -= moved;
        }

        // Fill empty slots with new stacks.
        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if slot.is_some() {
                continue;
            }
            let moved = remaining.min(MAX_STACK_SIZE);
            *slot = Some(ItemStack {
                material: stack.material,
                variant: stack.variant,
                quantity: moved,
            });
            remaining -= moved;
        }

        if remaining == 0 {
            None
        } else {
            Some(ItemStack {
                material: stack.material,
                variant: stack.variant,
                quantity: remaining,
            })
        }
    }

    /// Iterates over the occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.slots.iter().flatten()
    }
}

impl InventorySource for PlayerInventory {
    fn slots(&self) -> Vec<Option<ItemStack>> {
        self.slots.clone()
    }

    fn set_slots(&mut self, slots: Vec<Option<ItemStack>>) {
        debug_assert_eq!(slots.len(), self.slots.len());
        self.slots = slots;
    }
}
