//! Crafting session: the engine-side seam to the GUI/event layer.
//!
//! A session owns the batch multiplier and the external hooks (event gate,
//! stat sink) for one player's crafting menu. Craft attempts are
//! synchronous and serialized per player by the calling layer; the engine
//! itself holds no locks.

use quickcraft_common::{PlayerId, MAX_STACK_SIZE};
use tracing::debug;

use crate::inventory::{InventorySource, PlayerInventory};
use crate::item::ItemStack;
use crate::recipe::{AllowAll, CraftError, CraftGate, CraftResult, Recipe};

/// Sink for post-craft bookkeeping (achievements, statistics).
///
/// Notified once per distinct result material after a successful craft.
/// Failures here are the sink's problem; they never roll back the craft.
pub trait StatSink {
    /// Records that a player crafted a result item.
    fn record_craft(&mut self, player: PlayerId, result: &ItemStack);
}

/// Sink that discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStats;

impl StatSink for NoStats {
    fn record_craft(&mut self, _player: PlayerId, _result: &ItemStack) {}
}

/// A per-player crafting session.
pub struct CraftSession {
    owner: PlayerId,
    multiplier: u32,
    gate: Box<dyn CraftGate>,
    stats: Box<dyn StatSink>,
}

impl std::fmt::Debug for CraftSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CraftSession")
            .field("owner", &self.owner)
            .field("multiplier", &self.multiplier)
            .finish_non_exhaustive()
    }
}

impl CraftSession {
    /// Creates a session for a player with multiplier 1, an allow-all
    /// gate, and no stat sink.
    #[must_use]
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            multiplier: 1,
            gate: Box::new(AllowAll),
            stats: Box::new(NoStats),
        }
    }

    /// Returns the player this session belongs to.
    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Installs a crafting-event gate.
    #[must_use]
    pub fn with_gate(mut self, gate: impl CraftGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    /// Installs a stat sink.
    #[must_use]
    pub fn with_stats(mut self, stats: impl StatSink + 'static) -> Self {
        self.stats = Box::new(stats);
        self
    }

    /// Returns the current batch multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Sets the batch multiplier, clamped to at least 1.
    pub fn set_multiplier(&mut self, multiplier: u32) {
        self.multiplier = multiplier.max(1);
    }

    /// Checks whether a recipe should be offered in the menu at the current
    /// multiplier: the batch must not overflow a result stack and the
    /// inventory must afford one full batch. Never mutates the inventory.
    #[must_use]
    pub fn is_visible(&self, recipe: &Recipe, inventory: &dyn InventorySource) -> bool {
        recipe.is_craftable(&inventory.slots(), self.multiplier)
    }

    /// Attempts to craft one batch of a recipe against a live inventory.
    ///
    /// Applies the oversized-batch gate first, then delegates to
    /// [`Recipe::craft`]. On success, notifies the stat sink once per
    /// distinct result material and returns the full result list for the
    /// caller to distribute.
    pub fn craft(
        &mut self,
        recipe: &Recipe,
        inventory: &mut dyn InventorySource,
    ) -> CraftResult<Vec<ItemStack>> {
        if let Some(display) = recipe.display_result() {
            if display.quantity.saturating_mul(self.multiplier) > MAX_STACK_SIZE {
                return Err(CraftError::OversizedBatch {
                    multiplier: self.multiplier,
                });
            }
        }

        let results = recipe.craft(inventory, self.multiplier, self.gate.as_ref())?;

        let mut notified: Vec<_> = Vec::new();
        for stack in recipe.results() {
            if notified.contains(&stack.material) {
                continue;
            }
            notified.push(stack.material);
            self.stats.record_craft(self.owner, &stack);
        }

        debug!(
            player = self.owner.raw(),
            multiplier = self.multiplier,
            results = results.len(),
            "craft committed"
        );
        Ok(results)
    }

    /// Adds crafted results to an inventory, returning the stacks that did
    /// not fit. The caller drops the overflow into the world.
    pub fn distribute(
        &self,
        results: Vec<ItemStack>,
        inventory: &mut PlayerInventory,
    ) -> Vec<ItemStack> {
        results
            .into_iter()
            .filter_map(|stack| inventory.add(stack))
            .collect()
    }
}
