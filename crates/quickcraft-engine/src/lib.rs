//! # QuickCraft Engine
//!
//! Crafting-recipe resolution for a game-server crafting menu.
//!
//! Given a player's inventory contents, a recipe definition, and a batch
//! multiplier, the engine decides whether the recipe can be satisfied,
//! atomically consumes the matched ingredients, and computes the exact set
//! of items to hand back:
//! - Item stacks and ingredient matchers (exact-variant and wildcard)
//! - In-place slot matching with fixed-before-wildcard ordering
//! - Craft orchestration on a disposable inventory copy (commit on success)
//! - Byproduct derivation for container-type ingredients
//! - Recipe catalog with structural deduplication and display ordering
//! - Crafting session seam: batch multiplier, event gate, stat sink
//!
//! The engine is single-threaded and synchronous; the calling layer
//! serializes craft attempts per player.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod byproduct;
pub mod catalog;
pub mod display;
pub mod ingredient;
pub mod inventory;
pub mod item;
pub mod recipe;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::byproduct::*;
    pub use crate::catalog::*;
    pub use crate::display::*;
    pub use crate::ingredient::*;
    pub use crate::inventory::*;
    pub use crate::item::*;
    pub use crate::recipe::*;
    pub use crate::session::*;
}

pub use prelude::*;
