//! Entity trait: records identified by id rather than by value.

/// Anything looked up, carted or saved by its identifier.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    fn has_id(&self, id: &Self::Id) -> bool {
        self.id() == id
    }
}
