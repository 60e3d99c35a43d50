//! Item stack value type.

use quickcraft_common::{MaterialId, VariantId};
use serde::{Deserialize, Serialize};

/// A homogeneous stack of in-game items.
///
/// Two stacks are equal iff material, variant, and quantity are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemStack {
    /// Base item type
    pub material: MaterialId,
    /// Optional sub-variant
    pub variant: Option<VariantId>,
    /// Number of items in the stack
    pub quantity: u32,
}

impl ItemStack {
    /// Creates a stack with no sub-variant.
    #[must_use]
    pub const fn new(material: MaterialId, quantity: u32) -> Self {
        Self {
            material,
            variant: None,
            quantity,
        }
    }

    /// Creates a stack with a sub-variant.
    #[must_use]
    pub const fn with_variant(material: MaterialId, variant: VariantId, quantity: u32) -> Self {
        Self {
            material,
            variant: Some(variant),
            quantity,
        }
    }

    /// Returns a new stack with the quantity scaled by a batch multiplier.
    ///
    /// Saturates on overflow; callers gate absurd multipliers before they
    /// reach a craft (see the oversized-batch visibility check).
    #[must_use]
    pub fn scaled(&self, multiplier: u32) -> Self {
        Self {
            material: self.material,
            variant: self.variant,
            quantity: self.quantity.saturating_mul(multiplier),
        }
    }
}

impl std::fmt::Display for ItemStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.variant {
            Some(variant) => write!(f, "{}:{} x{}", self.material, variant, self.quantity),
            None => write!(f, "{} x{}", self.material, self.quantity),
        }
    }
}
