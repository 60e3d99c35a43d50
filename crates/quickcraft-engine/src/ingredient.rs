//! Ingredient matchers and in-place slot consumption.

use quickcraft_common::{MaterialId, VariantId};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::item::ItemStack;

/// How an ingredient matches an item's sub-variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum VariantMatch {
    /// Matches any sub-variant of the material (wildcard).
    Any,
    /// Matches only the exact sub-variant (including "no variant").
    Exact(Option<VariantId>),
}

/// A matcher over item stacks: a required material plus a variant rule.
///
/// Identity (for use as a map key) is material + variant rule; the required
/// quantity per craft lives in the recipe's ingredient map. A wildcard
/// ingredient is distinct from a fixed-variant ingredient of the same
/// material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Ingredient {
    /// Required material
    pub material: MaterialId,
    /// Variant rule
    pub variant: VariantMatch,
}

impl Ingredient {
    /// Creates an ingredient matching any sub-variant of a material.
    #[must_use]
    pub const fn any(material: MaterialId) -> Self {
        Self {
            material,
            variant: VariantMatch::Any,
        }
    }

    /// Creates an ingredient matching one exact sub-variant.
    #[must_use]
    pub const fn exact(material: MaterialId, variant: VariantId) -> Self {
        Self {
            material,
            variant: VariantMatch::Exact(Some(variant)),
        }
    }

    /// Creates an ingredient matching only items with no sub-variant.
    #[must_use]
    pub const fn plain(material: MaterialId) -> Self {
        Self {
            material,
            variant: VariantMatch::Exact(None),
        }
    }

    /// Returns true if this ingredient may match any sub-variant.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self.variant, VariantMatch::Any)
    }

    /// Checks whether a stack satisfies this ingredient.
    #[must_use]
    pub fn matches(&self, stack: &ItemStack) -> bool {
        if stack.material != self.material {
            return false;
        }
        match self.variant {
            VariantMatch::Any => true,
            VariantMatch::Exact(variant) => stack.variant == variant,
        }
    }

    /// Removes up to `required` matching items from the slot array in place.
    ///
    /// Scans the slots in order, decrementing or clearing matched slots as
    /// it consumes them. Returns true once `required` items were consumed;
    /// returns false if the array was exhausted first. Partial consumption
    /// on failure is not rolled back here: callers operate on a disposable
    /// copy and commit only after every ingredient of a recipe succeeded.
    pub fn remove(&self, slots: &mut [Option<ItemStack>], required: u32) -> bool {
        let mut remaining = required;
        if remaining == 0 {
            return true;
        }
        for slot in slots.iter_mut() {
            let Some(stack) = slot else { continue };
            if !self.matches(stack) {
                continue;
            }
            let take = stack.quantity.min(remaining);
            remaining -= take;
            if take == stack.quantity {
                *slot = None;
            } else {
                stack.quantity -= take;
            }
            if remaining == 0 {
                return true;
            }
        }
        trace!(ingredient = %self, required, remaining, "ingredient shortfall");
        false
    }

    /// Builds a representative stack for this ingredient, used when laying
    /// out a crafting-grid matrix for the event gate.
    #[must_use]
    pub fn display_stack(&self, quantity: u32) -> ItemStack {
        match self.variant {
            VariantMatch::Exact(Some(variant)) => {
                ItemStack::with_variant(self.material, variant, quantity)
            }
            VariantMatch::Exact(None) | VariantMatch::Any => {
                ItemStack::new(self.material, quantity)
            }
        }
    }
}

impl std::fmt::Display for Ingredient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.variant {
            VariantMatch::Any => write!(f, "{} (any variant)", self.material),
            VariantMatch::Exact(Some(variant)) => write!(f, "{}:{}", self.material, variant),
            VariantMatch::Exact(None) => write!(f, "{}", self.material),
        }
    }
}
