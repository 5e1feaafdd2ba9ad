//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Entities that carry an on-hand stock count.
pub trait Stocked {
    fn stock(&self) -> u64;

    fn stock_mut(&mut self) -> &mut u64;
}
