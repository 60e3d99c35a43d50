//! # QuickCraft Common
//!
//! Common types and shared constants for the QuickCraft crafting engine.
//!
//! This crate provides the foundational pieces used across all QuickCraft
//! subsystems:
//! - ID types (`MaterialId`, `VariantId`, `RecipeId`, `PlayerId`)
//! - Platform limits (maximum stack size)
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod limits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::limits::*;
}

pub use prelude::*;
