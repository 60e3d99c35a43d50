//! Recipe definitions, affordability checks, and craft orchestration.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use quickcraft_common::{RecipeId, MAX_STACK_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::byproduct::ContainerRules;
use crate::ingredient::Ingredient;
use crate::inventory::InventorySource;
use crate::item::ItemStack;

/// Craft failure modes.
///
/// All ingredient-removal and veto failures collapse to one of these at the
/// craft boundary; the engine does not report which ingredient was missing.
/// Callers wanting user feedback re-run the affordability check separately.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CraftError {
    /// Not enough matching items in the inventory for the requested batch
    #[error("not enough matching ingredients in the inventory")]
    InsufficientIngredients,
    /// The crafting-event gate declined the craft
    #[error("craft cancelled by the crafting-event gate")]
    Vetoed,
    /// The batch would scale the display result past one full stack
    #[error("batch multiplier {multiplier} would exceed the maximum stack size")]
    OversizedBatch {
        /// Requested multiplier
        multiplier: u32,
    },
}

/// Result type for craft operations.
pub type CraftResult<T> = Result<T, CraftError>;

/// Synchronous veto gate for grid-crafted recipes.
///
/// Called once per craft, after ingredient matching succeeded and before
/// anything is committed to the live inventory. Returning false cancels the
/// craft; the inventory is left untouched.
pub trait CraftGate {
    /// Decides whether the craft may proceed.
    fn try_craft(
        &self,
        recipe: RecipeId,
        matrix: &[Option<ItemStack>],
        primary: Option<&ItemStack>,
    ) -> bool;
}

/// Gate that allows every craft.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CraftGate for AllowAll {
    fn try_craft(
        &self,
        _recipe: RecipeId,
        _matrix: &[Option<ItemStack>],
        _primary: Option<&ItemStack>,
    ) -> bool {
        true
    }
}

/// Capability set provided by a concrete recipe definition.
///
/// Replaces inheritance with a small seam: a definition exposes its
/// ingredient map and result list, and optionally a crafting-grid layout
/// plus a handle to the natively registered recipe. The [`Recipe`] wrapper
/// builds everything else (byproducts, affordability, the craft operation)
/// on top of this.
pub trait RecipeSource: std::fmt::Debug + Send + Sync {
    /// Ingredient requirements per single craft. Never contains an
    /// empty-slot entry.
    fn ingredients(&self) -> &BTreeMap<Ingredient, u32>;

    /// Produced results, in order; index 0 is the primary/display result.
    fn results(&self) -> &[ItemStack];

    /// Crafting-grid layout, if this recipe is crafted through a grid.
    fn grid(&self) -> Option<&[Option<Ingredient>]> {
        None
    }

    /// Handle to the native recipe definition, if one exists.
    fn native_handle(&self) -> Option<RecipeId> {
        None
    }
}

/// A recipe without a grid shape, defined directly by its ingredient map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleRecipe {
    ingredients: BTreeMap<Ingredient, u32>,
    results: Vec<ItemStack>,
}

impl SimpleRecipe {
    /// Creates a new simple recipe builder.
    #[must_use]
    pub fn builder() -> SimpleRecipeBuilder {
        SimpleRecipeBuilder::default()
    }
}

impl RecipeSource for SimpleRecipe {
    fn ingredients(&self) -> &BTreeMap<Ingredient, u32> {
        &self.ingredients
    }

    fn results(&self) -> &[ItemStack] {
        &self.results
    }
}

/// Builder for [`SimpleRecipe`].
#[derive(Debug, Default)]
pub struct SimpleRecipeBuilder {
    ingredients: BTreeMap<Ingredient, u32>,
    results: Vec<ItemStack>,
}

impl SimpleRecipeBuilder {
    /// Adds an ingredient requirement (merged if the same matcher was
    /// already added).
    #[must_use]
    pub fn ingredient(mut self, ingredient: Ingredient, quantity: u32) -> Self {
        *self.ingredients.entry(ingredient).or_insert(0) += quantity;
        self
    }

    /// Appends a result. The first result added becomes the display result.
    #[must_use]
    pub fn result(mut self, stack: ItemStack) -> Self {
        self.results.push(stack);
        self
    }

    /// Builds the recipe definition.
    #[must_use]
    pub fn build(self) -> SimpleRecipe {
        SimpleRecipe {
            ingredients: self.ingredients,
            results: self.results,
        }
    }
}

/// A recipe crafted through a fixed 3x3 grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedRecipe {
    handle: RecipeId,
    cells: Vec<Option<Ingredient>>,
    ingredients: BTreeMap<Ingredient, u32>,
    results: Vec<ItemStack>,
}

/// Number of cells in a shaped crafting grid.
pub const GRID_CELLS: usize = 9;

impl ShapedRecipe {
    /// Creates a shaped recipe from its grid cells (row-major, one item per
    /// occupied cell per craft). The ingredient map is derived by summing
    /// the cells.
    #[must_use]
    pub fn new(
        handle: RecipeId,
        cells: [Option<Ingredient>; GRID_CELLS],
        results: Vec<ItemStack>,
    ) -> Self {
        let mut ingredients = BTreeMap::new();
        for ingredient in cells.iter().flatten() {
            *ingredients.entry(*ingredient).or_insert(0) += 1;
        }
        Self {
            handle,
            cells: cells.to_vec(),
            ingredients,
            results,
        }
    }
}

impl RecipeSource for ShapedRecipe {
    fn ingredients(&self) -> &BTreeMap<Ingredient, u32> {
        &self.ingredients
    }

    fn results(&self) -> &[ItemStack] {
        &self.results
    }

    fn grid(&self) -> Option<&[Option<Ingredient>]> {
        Some(&self.cells)
    }

    fn native_handle(&self) -> Option<RecipeId> {
        Some(self.handle)
    }
}

/// A grid recipe whose ingredients may be laid out in any arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapelessRecipe {
    handle: RecipeId,
    ingredients: BTreeMap<Ingredient, u32>,
    grid: Vec<Option<Ingredient>>,
    results: Vec<ItemStack>,
}

impl ShapelessRecipe {
    /// Creates a shapeless recipe. A canonical grid layout (one cell per
    /// ingredient unit, in matcher order) is derived for the event gate.
    #[must_use]
    pub fn new(
        handle: RecipeId,
        inputs: impl IntoIterator<Item = (Ingredient, u32)>,
        results: Vec<ItemStack>,
    ) -> Self {
        let mut ingredients: BTreeMap<Ingredient, u32> = BTreeMap::new();
        for (ingredient, quantity) in inputs {
            *ingredients.entry(ingredient).or_insert(0) += quantity;
        }

        let mut grid = Vec::new();
        for (ingredient, &quantity) in &ingredients {
            for _ in 0..quantity {
                grid.push(Some(*ingredient));
            }
        }

        Self {
            handle,
            ingredients,
            grid,
            results,
        }
    }
}

impl RecipeSource for ShapelessRecipe {
    fn ingredients(&self) -> &BTreeMap<Ingredient, u32> {
        &self.ingredients
    }

    fn results(&self) -> &[ItemStack] {
        &self.results
    }

    fn grid(&self) -> Option<&[Option<Ingredient>]> {
        Some(&self.grid)
    }

    fn native_handle(&self) -> Option<RecipeId> {
        Some(self.handle)
    }
}

/// An immutable recipe with its derived economics.
///
/// Wraps a [`RecipeSource`] definition together with the container rules
/// used to derive byproducts. Long-lived: constructed once at registration
/// time and never mutated. All public accessors copy at the boundary.
#[derive(Debug)]
pub struct Recipe {
    source: Box<dyn RecipeSource>,
    rules: ContainerRules,
}

impl Recipe {
    /// Wraps a definition with no container byproducts.
    #[must_use]
    pub fn new(source: impl RecipeSource + 'static) -> Self {
        Self::with_rules(source, ContainerRules::new())
    }

    /// Wraps a definition with the given container rules.
    #[must_use]
    pub fn with_rules(source: impl RecipeSource + 'static, rules: ContainerRules) -> Self {
        Self {
            source: Box::new(source),
            rules,
        }
    }

    /// Returns the ingredient requirements per single craft.
    #[must_use]
    pub fn ingredients(&self) -> BTreeMap<Ingredient, u32> {
        self.source.ingredients().clone()
    }

    /// Returns the unscaled results, in declaration order.
    #[must_use]
    pub fn results(&self) -> Vec<ItemStack> {
        self.source.results().to_vec()
    }

    /// Returns the primary result shown in the crafting menu, if any.
    ///
    /// Recipes with no results are degenerate; they are rejected by the
    /// catalog and report themselves as never craftable.
    #[must_use]
    pub fn display_result(&self) -> Option<ItemStack> {
        self.source.results().first().cloned()
    }

    /// Returns the handle to the native recipe definition, if any.
    #[must_use]
    pub fn native_handle(&self) -> Option<RecipeId> {
        self.source.native_handle()
    }

    /// Returns the byproduct stacks for one craft batch, derived from the
    /// container-type ingredients scaled by the multiplier.
    #[must_use]
    pub fn byproducts(&self, multiplier: u32) -> Vec<ItemStack> {
        self.rules.byproducts(self.source.ingredients(), multiplier)
    }

    /// Returns every item handed back by one craft batch: the declared
    /// results scaled by the multiplier, followed by the byproducts.
    #[must_use]
    pub fn all_results(&self, multiplier: u32) -> Vec<ItemStack> {
        let mut items: Vec<ItemStack> = self
            .source
            .results()
            .iter()
            .map(|stack| stack.scaled(multiplier))
            .collect();
        items.extend(self.byproducts(multiplier));
        items
    }

    /// Returns the crafting-grid matrix scaled by the multiplier, if this
    /// recipe is crafted through a grid.
    #[must_use]
    pub fn matrix(&self, multiplier: u32) -> Option<Vec<Option<ItemStack>>> {
        self.source.grid().map(|cells| {
            cells
                .iter()
                .map(|cell| cell.as_ref().map(|i| i.display_stack(multiplier)))
                .collect()
        })
    }

    /// Removes one batch worth of every ingredient from the slot array.
    ///
    /// Fixed-variant ingredients are matched strictly before wildcard
    /// ingredients, so a wildcard cannot consume a specific variant that
    /// another ingredient still needs. This ordering is a correctness
    /// requirement: an unordered removal can fail a craft for which a valid
    /// matching exists.
    ///
    /// Returns false on shortfall, leaving the array partially consumed;
    /// callers pass a disposable copy and commit only on success.
    pub fn remove_ingredients(&self, slots: &mut [Option<ItemStack>], multiplier: u32) -> bool {
        let ingredients = self.source.ingredients();
        let ordered = ingredients
            .iter()
            .filter(|(i, _)| !i.is_wildcard())
            .chain(ingredients.iter().filter(|(i, _)| i.is_wildcard()));

        for (ingredient, &quantity) in ordered {
            if !ingredient.remove(slots, quantity.saturating_mul(multiplier)) {
                return false;
            }
        }
        true
    }

    /// Checks whether one batch can be crafted from the given contents.
    ///
    /// Operates on a throwaway copy; the caller's slots are never mutated.
    /// Also applies the oversized-batch gate: a batch that would scale the
    /// display result past [`MAX_STACK_SIZE`] is never offered, regardless
    /// of ingredient availability.
    #[must_use]
    pub fn is_craftable(&self, slots: &[Option<ItemStack>], multiplier: u32) -> bool {
        let Some(display) = self.display_result() else {
            return false;
        };
        if display.quantity.saturating_mul(multiplier) > MAX_STACK_SIZE {
            return false;
        }
        let mut scratch = slots.to_vec();
        self.remove_ingredients(&mut scratch, multiplier)
    }

    /// Crafts one batch against a live inventory.
    ///
    /// Takes a copy of the inventory contents, runs the full ordered
    /// ingredient removal against the copy, consults the event gate for
    /// grid recipes, and only then commits the mutated copy back. Either
    /// the full required set is removed and the full result set returned,
    /// or the inventory is left exactly as it was.
    pub fn craft(
        &self,
        inventory: &mut dyn InventorySource,
        multiplier: u32,
        gate: &dyn CraftGate,
    ) -> CraftResult<Vec<ItemStack>> {
        let mut scratch = inventory.slots();
        if !self.remove_ingredients(&mut scratch, multiplier) {
            debug!(multiplier, "craft declined: insufficient ingredients");
            return Err(CraftError::InsufficientIngredients);
        }

        // The native crafting event fires only for recipes that declare a
        // grid and carry a native handle.
        if let (Some(handle), Some(matrix)) = (self.native_handle(), self.matrix(multiplier)) {
            if !gate.try_craft(handle, &matrix, self.display_result().as_ref()) {
                debug!(multiplier, recipe = handle.raw(), "craft vetoed by event gate");
                return Err(CraftError::Vetoed);
            }
        }

        inventory.set_slots(scratch);
        Ok(self.all_results(multiplier))
    }

    /// Total order for menu display: display-result material, then variant,
    /// then quantity, ascending. Independent from structural equality; a
    /// recipe with no display result sorts before any recipe with one.
    #[must_use]
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        match (self.display_result(), other.display_result()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a
                .material
                .cmp(&b.material)
                .then(a.variant.cmp(&b.variant))
                .then(a.quantity.cmp(&b.quantity)),
        }
    }
}

impl PartialEq for Recipe {
    /// Structural equality over the full recipe economics: two recipes
    /// built from different native definitions are interchangeable if their
    /// results, ingredients, and byproducts coincide.
    fn eq(&self, other: &Self) -> bool {
        self.display_result() == other.display_result()
            && self.source.results() == other.source.results()
            && self.source.ingredients() == other.source.ingredients()
            && self.byproducts(1) == other.byproducts(1)
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.display_result().hash(state);
        self.source.results().hash(state);
        for (ingredient, quantity) in self.source.ingredients() {
            ingredient.hash(state);
            quantity.hash(state);
        }
        self.byproducts(1).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::PlayerInventory;
    use quickcraft_common::{MaterialId, VariantId};

    const WOOD: MaterialId = MaterialId::new(1);
    const STONE: MaterialId = MaterialId::new(2);
    const WATER_BUCKET: MaterialId = MaterialId::new(10);
    const BUCKET: MaterialId = MaterialId::new(12);
    const PLANK: MaterialId = MaterialId::new(20);

    /// Gate that refuses everything.
    struct DenyAll;

    impl CraftGate for DenyAll {
        fn try_craft(
            &self,
            _recipe: RecipeId,
            _matrix: &[Option<ItemStack>],
            _primary: Option<&ItemStack>,
        ) -> bool {
            false
        }
    }

    fn plank_recipe() -> Recipe {
        Recipe::new(
            SimpleRecipe::builder()
                .ingredient(Ingredient::any(WOOD), 2)
                .result(ItemStack::new(PLANK, 4))
                .build(),
        )
    }

    fn inventory_with(stacks: &[ItemStack]) -> PlayerInventory {
        let mut slots: Vec<Option<ItemStack>> = stacks.iter().cloned().map(Some).collect();
        slots.resize(9, None);
        PlayerInventory::from_slots(slots)
    }

    #[test]
    fn test_craft_consumes_and_returns_results() {
        let recipe = plank_recipe();
        let mut inv = inventory_with(&[ItemStack::new(WOOD, 5)]);

        let results = recipe.craft(&mut inv, 1, &AllowAll).expect("craftable");
        assert_eq!(results, vec![ItemStack::new(PLANK, 4)]);
        assert_eq!(inv.slot(0), Ok(Some(&ItemStack::new(WOOD, 3))));
    }

    #[test]
    fn test_craft_insufficient_leaves_inventory_untouched() {
        let recipe = Recipe::new(
            SimpleRecipe::builder()
                .ingredient(Ingredient::any(WOOD), 2)
                .ingredient(Ingredient::any(STONE), 3)
                .result(ItemStack::new(PLANK, 1))
                .build(),
        );
        // Enough wood, not enough stone: the wood removal succeeds on the
        // scratch copy before the stone shortfall is detected.
        let mut inv = inventory_with(&[ItemStack::new(WOOD, 5), ItemStack::new(STONE, 1)]);
        let before = inv.clone();

        let result = recipe.craft(&mut inv, 1, &AllowAll);
        assert_eq!(result, Err(CraftError::InsufficientIngredients));
        assert_eq!(inv, before);
    }

    #[test]
    fn test_craft_scales_with_multiplier() {
        let recipe = plank_recipe();
        let mut inv = inventory_with(&[ItemStack::new(WOOD, 10)]);

        let results = recipe.craft(&mut inv, 3, &AllowAll).expect("craftable");
        assert_eq!(results, vec![ItemStack::new(PLANK, 12)]);
        assert_eq!(inv.slot(0), Ok(Some(&ItemStack::new(WOOD, 4))));
    }

    #[test]
    fn test_multiplier_linearity() {
        let recipe = Recipe::with_rules(
            SimpleRecipe::builder()
                .ingredient(Ingredient::plain(WATER_BUCKET), 1)
                .ingredient(Ingredient::any(WOOD), 2)
                .result(ItemStack::new(PLANK, 2))
                .build(),
            ContainerRules::new().with_container(WATER_BUCKET, BUCKET),
        );

        let base = recipe.all_results(1);
        let tripled = recipe.all_results(3);
        let expected: Vec<ItemStack> = base.iter().map(|s| s.scaled(3)).collect();
        assert_eq!(tripled, expected);
    }

    #[test]
    fn test_fixed_variant_consumed_before_wildcard() {
        // Recipe: 2x any-variant WOOD + 1x WOOD variant 5.
        // Inventory: one (WOOD, v5) and three (WOOD, v3) singles. A naive
        // wildcard-first removal eats the v5 item and fails; fixed-first
        // succeeds and leaves one v3 item.
        let recipe = Recipe::new(
            SimpleRecipe::builder()
                .ingredient(Ingredient::any(WOOD), 2)
                .ingredient(Ingredient::exact(WOOD, VariantId::new(5)), 1)
                .result(ItemStack::new(PLANK, 1))
                .build(),
        );

        let mut inv = inventory_with(&[
            ItemStack::with_variant(WOOD, VariantId::new(5), 1),
            ItemStack::with_variant(WOOD, VariantId::new(3), 1),
            ItemStack::with_variant(WOOD, VariantId::new(3), 1),
            ItemStack::with_variant(WOOD, VariantId::new(3), 1),
        ]);

        let results = recipe.craft(&mut inv, 1, &AllowAll).expect("valid matching exists");
        assert_eq!(results, vec![ItemStack::new(PLANK, 1)]);

        // The v5 item went to the fixed requirement, two v3 items to the
        // wildcard, one v3 item remains.
        let remaining: Vec<&ItemStack> = inv.iter().collect();
        assert_eq!(
            remaining,
            vec![&ItemStack::with_variant(WOOD, VariantId::new(3), 1)]
        );
    }

    #[test]
    fn test_naive_wildcard_first_order_would_fail() {
        // Same setup as above, demonstrating the ordering is load-bearing:
        // removing the wildcard requirement first can consume the v5 item.
        let wildcard = Ingredient::any(WOOD);
        let fixed = Ingredient::exact(WOOD, VariantId::new(5));

        let mut slots = vec![
            Some(ItemStack::with_variant(WOOD, VariantId::new(5), 1)),
            Some(ItemStack::with_variant(WOOD, VariantId::new(3), 1)),
            Some(ItemStack::with_variant(WOOD, VariantId::new(3), 1)),
            Some(ItemStack::with_variant(WOOD, VariantId::new(3), 1)),
        ];

        assert!(wildcard.remove(&mut slots, 2));
        assert!(!fixed.remove(&mut slots, 1));
    }

    #[test]
    fn test_is_craftable_does_not_mutate() {
        let recipe = plank_recipe();
        let inv = inventory_with(&[ItemStack::new(WOOD, 5)]);
        let slots = inv.slots();

        assert!(recipe.is_craftable(&slots, 1));
        assert_eq!(slots, inv.slots());
    }

    #[test]
    fn test_affordability_implies_craftability() {
        let recipe = plank_recipe();
        let inv = inventory_with(&[ItemStack::new(WOOD, 4)]);

        for multiplier in 1..=4 {
            let affordable = recipe.is_craftable(&inv.slots(), multiplier);
            let mut scratch = inv.clone();
            let crafted = recipe.craft(&mut scratch, multiplier, &AllowAll);
            assert_eq!(affordable, crafted.is_ok(), "multiplier {multiplier}");
            if let Ok(results) = crafted {
                assert!(!results.is_empty());
            }
        }
    }

    #[test]
    fn test_oversized_batch_not_offered() {
        let recipe = plank_recipe();
        let inv = inventory_with(&[ItemStack::new(WOOD, 64)]);

        // 4 x 16 = 64 fits exactly; 4 x 17 = 68 does not.
        assert!(recipe.is_craftable(&inv.slots(), 16));
        assert!(!recipe.is_craftable(&inv.slots(), 17));
    }

    #[test]
    fn test_degenerate_recipe_never_craftable() {
        let recipe = Recipe::new(
            SimpleRecipe::builder()
                .ingredient(Ingredient::any(WOOD), 1)
                .build(),
        );
        let inv = inventory_with(&[ItemStack::new(WOOD, 64)]);
        assert!(!recipe.is_craftable(&inv.slots(), 1));
    }

    #[test]
    fn test_veto_gate_aborts_without_commit() {
        let recipe = Recipe::new(ShapedRecipe::new(
            RecipeId::new(7),
            [
                Some(Ingredient::any(WOOD)),
                Some(Ingredient::any(WOOD)),
                None,
                None,
                None,
                None,
                None,
                None,
                None,
            ],
            vec![ItemStack::new(PLANK, 1)],
        ));

        let mut inv = inventory_with(&[ItemStack::new(WOOD, 5)]);
        let before = inv.clone();

        let result = recipe.craft(&mut inv, 1, &DenyAll);
        assert_eq!(result, Err(CraftError::Vetoed));
        assert_eq!(inv, before);
    }

    #[test]
    fn test_gate_not_consulted_for_gridless_recipes() {
        // SimpleRecipe has no grid, so even a deny-all gate cannot veto it.
        let recipe = plank_recipe();
        let mut inv = inventory_with(&[ItemStack::new(WOOD, 5)]);
        assert!(recipe.craft(&mut inv, 1, &DenyAll).is_ok());
    }

    #[test]
    fn test_matrix_scaled_by_multiplier() {
        let recipe = Recipe::new(ShapedRecipe::new(
            RecipeId::new(7),
            [
                Some(Ingredient::any(WOOD)),
                None,
                None,
                None,
                Some(Ingredient::exact(STONE, VariantId::new(1))),
                None,
                None,
                None,
                None,
            ],
            vec![ItemStack::new(PLANK, 1)],
        ));

        let matrix = recipe.matrix(3).expect("shaped recipe has a matrix");
        assert_eq!(matrix.len(), GRID_CELLS);
        assert_eq!(matrix[0], Some(ItemStack::new(WOOD, 3)));
        assert_eq!(
            matrix[4],
            Some(ItemStack::with_variant(STONE, VariantId::new(1), 3))
        );
        assert_eq!(matrix[1], None);
    }

    #[test]
    fn test_shapeless_grid_one_cell_per_unit() {
        let recipe = ShapelessRecipe::new(
            RecipeId::new(3),
            [(Ingredient::any(WOOD), 2), (Ingredient::plain(STONE), 1)],
            vec![ItemStack::new(PLANK, 1)],
        );

        let grid = recipe.grid().expect("shapeless recipe has a grid");
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.iter().flatten().filter(|i| i.material == WOOD).count(), 2);
        assert_eq!(grid.iter().flatten().filter(|i| i.material == STONE).count(), 1);
    }

    #[test]
    fn test_byproducts_appended_to_results() {
        let recipe = Recipe::with_rules(
            SimpleRecipe::builder()
                .ingredient(Ingredient::plain(WATER_BUCKET), 3)
                .result(ItemStack::new(PLANK, 1))
                .build(),
            ContainerRules::new().with_container(WATER_BUCKET, BUCKET),
        );

        let mut inv = inventory_with(&[ItemStack::new(WATER_BUCKET, 6)]);
        let results = recipe.craft(&mut inv, 2, &AllowAll).expect("craftable");
        assert_eq!(
            results,
            vec![ItemStack::new(PLANK, 2), ItemStack::new(BUCKET, 6)]
        );
    }

    #[test]
    fn test_structural_equality_ignores_construction_order() {
        let a = Recipe::new(
            SimpleRecipe::builder()
                .ingredient(Ingredient::any(WOOD), 2)
                .ingredient(Ingredient::plain(STONE), 1)
                .result(ItemStack::new(PLANK, 4))
                .build(),
        );
        let b = Recipe::new(
            SimpleRecipe::builder()
                .ingredient(Ingredient::plain(STONE), 1)
                .ingredient(Ingredient::any(WOOD), 2)
                .result(ItemStack::new(PLANK, 4))
                .build(),
        );

        assert_eq!(a, b);

        let hash = |r: &Recipe| ahash::RandomState::with_seeds(1, 2, 3, 4).hash_one(r);
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn test_equality_across_definition_kinds() {
        // A shaped and a simple recipe with identical economics compare
        // equal: equality is structural, not identity-based.
        let shaped = Recipe::new(ShapedRecipe::new(
            RecipeId::new(9),
            [
                Some(Ingredient::any(WOOD)),
                Some(Ingredient::any(WOOD)),
                None,
                None,
                None,
                None,
                None,
                None,
                None,
            ],
            vec![ItemStack::new(PLANK, 4)],
        ));
        let simple = Recipe::new(
            SimpleRecipe::builder()
                .ingredient(Ingredient::any(WOOD), 2)
                .result(ItemStack::new(PLANK, 4))
                .build(),
        );

        assert_eq!(shaped, simple);
    }

    #[test]
    fn test_inequality_on_byproducts() {
        let source = SimpleRecipe::builder()
            .ingredient(Ingredient::plain(WATER_BUCKET), 1)
            .result(ItemStack::new(PLANK, 1))
            .build();

        let with_bucket = Recipe::with_rules(
            source.clone(),
            ContainerRules::new().with_container(WATER_BUCKET, BUCKET),
        );
        let without = Recipe::new(source);

        assert_ne!(with_bucket, without);
    }

    #[test]
    fn test_display_cmp_ordering() {
        let by_display = |stack: ItemStack| {
            Recipe::new(
                SimpleRecipe::builder()
                    .ingredient(Ingredient::any(WOOD), 1)
                    .result(stack)
                    .build(),
            )
        };

        let low_material = by_display(ItemStack::new(MaterialId::new(1), 1));
        let high_material = by_display(ItemStack::new(MaterialId::new(2), 1));
        let low_variant = by_display(ItemStack::with_variant(MaterialId::new(2), VariantId::new(1), 1));
        let high_variant = by_display(ItemStack::with_variant(MaterialId::new(2), VariantId::new(4), 1));
        let big = by_display(ItemStack::with_variant(MaterialId::new(2), VariantId::new(4), 9));

        assert_eq!(low_material.display_cmp(&high_material), Ordering::Less);
        assert_eq!(high_material.display_cmp(&low_variant), Ordering::Less);
        assert_eq!(low_variant.display_cmp(&high_variant), Ordering::Less);
        assert_eq!(high_variant.display_cmp(&big), Ordering::Less);
        assert_eq!(big.display_cmp(&big), Ordering::Equal);
        assert_eq!(big.display_cmp(&low_material), Ordering::Greater);
    }

    mod craft_properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn craft_is_all_or_nothing(
                wood in 0u32..12,
                stone in 0u32..12,
                multiplier in 1u32..4,
            ) {
                let recipe = Recipe::new(
                    SimpleRecipe::builder()
                        .ingredient(Ingredient::any(WOOD), 2)
                        .ingredient(Ingredient::any(STONE), 3)
                        .result(ItemStack::new(PLANK, 1))
                        .build(),
                );
                let mut inv = inventory_with(&[
                    ItemStack::new(WOOD, wood.max(1)),
                    ItemStack::new(STONE, stone.max(1)),
                ]);
                let before = inv.clone();

                match recipe.craft(&mut inv, multiplier, &AllowAll) {
                    Ok(_) => {
                        let consumed = |material| {
                            before.count_matching(|s| s.material == material)
                                - inv.count_matching(|s| s.material == material)
                        };
                        prop_assert_eq!(consumed(WOOD), 2 * multiplier);
                        prop_assert_eq!(consumed(STONE), 3 * multiplier);
                    }
                    Err(_) => prop_assert_eq!(&inv, &before),
                }
            }

            #[test]
            fn results_scale_linearly(multiplier in 1u32..8) {
                let recipe = Recipe::with_rules(
                    SimpleRecipe::builder()
                        .ingredient(Ingredient::plain(WATER_BUCKET), 2)
                        .result(ItemStack::new(PLANK, 3))
                        .build(),
                    ContainerRules::new().with_container(WATER_BUCKET, BUCKET),
                );

                let total: u32 = recipe
                    .all_results(multiplier)
                    .iter()
                    .filter(|s| s.material == BUCKET)
                    .map(|s| s.quantity)
                    .sum();
                prop_assert_eq!(total, 2 * multiplier);

                let planks: u32 = recipe
                    .all_results(multiplier)
                    .iter()
                    .filter(|s| s.material == PLANK)
                    .map(|s| s.quantity)
                    .sum();
                prop_assert_eq!(planks, 3 * multiplier);
            }
        }
    }
}
