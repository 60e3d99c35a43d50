//! Platform limits.

/// Maximum quantity a single item stack may hold.
///
/// Used by the oversized-batch visibility gate and as the default capacity
/// for byproduct container packing.
pub const MAX_STACK_SIZE: u32 = 64;
