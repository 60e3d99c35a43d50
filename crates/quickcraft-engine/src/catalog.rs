//! Recipe catalog: registration, deduplication, and display ordering.

use ahash::HashSet;
use thiserror::Error;

use crate::item::ItemStack;
use crate::recipe::Recipe;

/// Catalog error types.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// Recipe produces nothing; malformed definitions never reach the menu
    #[error("recipe has no results")]
    EmptyResults,
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// An ordered, deduplicated collection of recipes.
///
/// Two recipes with identical results, ingredients, and byproducts are
/// structurally equal, so a recipe imported from two different native
/// definitions is stored once. Listing order follows
/// [`Recipe::display_cmp`].
#[derive(Debug, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    seen: HashSet<u64>,
}

impl RecipeCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a recipe.
    ///
    /// Returns `Ok(true)` if it was added, `Ok(false)` if a structurally
    /// identical recipe was already present, and an error for malformed
    /// definitions (the registry is the precondition gate for those).
    pub fn add(&mut self, recipe: Recipe) -> CatalogResult<bool> {
        if recipe.results().is_empty() {
            return Err(CatalogError::EmptyResults);
        }

        let fingerprint = self.fingerprint(&recipe);
        // Hash collision check falls back to full structural equality.
        if self.seen.contains(&fingerprint) && self.recipes.iter().any(|r| *r == recipe) {
            return Ok(false);
        }

        self.seen.insert(fingerprint);
        self.recipes.push(recipe);
        Ok(true)
    }

    /// Returns the number of registered recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Returns true if no recipes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterates over all recipes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Returns all recipes in display order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Recipe> {
        let mut recipes: Vec<&Recipe> = self.recipes.iter().collect();
        recipes.sort_by(|a, b| a.display_cmp(b));
        recipes
    }

    /// Returns the recipes craftable from the given contents at the given
    /// multiplier, in display order.
    #[must_use]
    pub fn craftable(&self, slots: &[Option<ItemStack>], multiplier: u32) -> Vec<&Recipe> {
        self.sorted()
            .into_iter()
            .filter(|recipe| recipe.is_craftable(slots, multiplier))
            .collect()
    }

    fn fingerprint(&self, recipe: &Recipe) -> u64 {
        // Fixed seeds: the fingerprint set must be stable across recipes
        // added at different times within one catalog.
        ahash::RandomState::with_seeds(0x51c3, 0xc4a7, 0x7001, 0x1dea).hash_one(recipe)
    }
}
