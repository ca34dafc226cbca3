//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A payment keeps its identity for its whole lifetime; booking, cancellation
/// and anonymisation change its state, never its id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
