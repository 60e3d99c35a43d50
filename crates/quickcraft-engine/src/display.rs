//! Tooltip/lore model for recipe buttons.
//!
//! Builds the line list shown on a recipe's menu item. Spacer lines are an
//! explicit variant, never a null sentinel; the presentation layer decides
//! how a [`LoreLine::Blank`] is rendered.

use serde::{Deserialize, Serialize};

use crate::recipe::Recipe;

/// One line of a recipe tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoreLine {
    /// A formatted text line
    Text(String),
    /// A blank spacer line
    Blank,
}

impl LoreLine {
    /// Creates a text line.
    #[must_use]
    pub fn text(line: impl Into<String>) -> Self {
        Self::Text(line.into())
    }
}

/// Builds the tooltip lines for a recipe at the given batch multiplier.
///
/// Lists each ingredient requirement scaled by the multiplier, and, when
/// the recipe produces more than one result, a results section separated by
/// a blank line. Read-only: derived entirely from the recipe's accessors.
#[must_use]
pub fn recipe_lore(recipe: &Recipe, multiplier: u32) -> Vec<LoreLine> {
    let mut lines = vec![LoreLine::text("Ingredients:")];

    for (ingredient, quantity) in recipe.ingredients() {
        let scaled = quantity.saturating_mul(multiplier);
        lines.push(LoreLine::text(format!("  {scaled}x {ingredient}")));
    }

    let results = recipe.results();
    if results.len() > 1 {
        lines.push(LoreLine::Blank);
        lines.push(LoreLine::text("Results:"));
        for stack in results {
            let scaled = stack.scaled(multiplier);
            lines.push(LoreLine::text(format!(
                "  {}x {}",
                scaled.quantity, scaled.material
            )));
        }
    }

    let byproducts = recipe.byproducts(multiplier);
    if !byproducts.is_empty() {
        lines.push(LoreLine::Blank);
        lines.push(LoreLine::text("Byproducts:"));
        for stack in byproducts {
            lines.push(LoreLine::text(format!(
                "  {}x {}",
                stack.quantity, stack.material
            )));
        }
    }

    lines
}
