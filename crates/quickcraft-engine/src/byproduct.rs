//! Byproduct computation for container-type ingredients.
//!
//! Recipes that consume filled containers (water buckets, lava buckets,
//! milk buckets, ...) hand the emptied container back to the player. The
//! byproduct set is derived from the ingredient map, never declared on the
//! recipe itself.

use quickcraft_common::{MaterialId, MAX_STACK_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ingredient::Ingredient;
use crate::item::ItemStack;

/// Rules describing which ingredient materials return an empty container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRules {
    /// Filled-container material -> empty-container material
    returns: BTreeMap<MaterialId, MaterialId>,
    /// Per-stack capacity for emitted containers
    stack_size: u32,
}

impl Default for ContainerRules {
    fn default() -> Self {
        Self {
            returns: BTreeMap::new(),
            stack_size: MAX_STACK_SIZE,
        }
    }
}

impl ContainerRules {
    /// Creates an empty rule set (no ingredient returns a container).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that consuming `filled` returns one `empty` per item.
    #[must_use]
    pub fn with_container(mut self, filled: MaterialId, empty: MaterialId) -> Self {
        self.returns.insert(filled, empty);
        self
    }

    /// Overrides the per-stack capacity for emitted containers. Capacities
    /// below one are clamped.
    #[must_use]
    pub fn with_stack_size(mut self, stack_size: u32) -> Self {
        self.stack_size = stack_size.max(1);
        self
    }

    /// Returns the empty container produced by consuming a material, if any.
    #[must_use]
    pub fn empty_for(&self, material: MaterialId) -> Option<MaterialId> {
        self.returns.get(&material).copied()
    }

    /// The capacity used when packing emitted container stacks.
    #[must_use]
    pub const fn stack_size(&self) -> u32 {
        self.stack_size
    }

    /// Computes the byproduct stacks for one craft batch.
    ///
    /// Sums `quantity-per-craft x multiplier` across all container-type
    /// ingredients, then greedily emits full stacks followed by one
    /// remainder stack. The total is scaled before packing, so no emitted
    /// stack ever exceeds the container stack size. Deterministic: totals
    /// accumulate per empty-container material in material order, and the
    /// greedy packing produces the minimum number of stacks.
    #[must_use]
    pub fn byproducts(
        &self,
        ingredients: &BTreeMap<Ingredient, u32>,
        multiplier: u32,
    ) -> Vec<ItemStack> {
        let mut totals: BTreeMap<MaterialId, u32> = BTreeMap::new();
        for (ingredient, &quantity) in ingredients {
            if let Some(empty) = self.empty_for(ingredient.material) {
                let scaled = quantity.saturating_mul(multiplier);
                *totals.entry(empty).or_insert(0) += scaled;
            }
        }

        let stack_size = self.stack_size();
        let mut result = Vec::new();
        for (material, mut total) in totals {
            while total > stack_size {
                result.push(ItemStack::new(material, stack_size));
                total -= stack_size;
            }
            if total > 0 {
                result.push(ItemStack::new(material, total));
            }
        }
        result
    }
}
