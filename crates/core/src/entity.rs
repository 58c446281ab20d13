//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities are mutable records with a stable identity: two entities with the
/// same id are the same record, whatever their current field values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
