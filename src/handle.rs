use std::marker::PhantomData;

use crate::registry::TypeTag;

/// Opaque token referring to a value stored in a
/// [`ResourceMap<T>`](crate::resource::ResourceMap).
///
/// A handle carries the [`TypeTag`] of `T` and the slot id the issuing map
/// assigned to the value. Equality and hashing compare the slot id only; the
/// tag is informational. A handle is only meaningful to the map that issued
/// it, but nothing in the handle records which map that was, so a handle can
/// structurally match an entry in an unrelated map of the same type.
pub struct Handle<T> {
    type_tag: TypeTag,
    slot: u64,
    _phantom: PhantomData<T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(type_tag: TypeTag, slot: u64) -> Self {
        Self {
            type_tag,
            slot,
            _phantom: PhantomData,
        }
    }

    /// The tag of `T` in the registry the issuing map was built from.
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// The slot id assigned by the issuing map. Unique among handles issued
    /// by one map and never reused after removal.
    pub fn slot(&self) -> u64 {
        self.slot
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        // Just compare the slot id's.
        self.slot == other.slot
    }
}

impl<T> Eq for Handle<T> {}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Handle")
            .field(&self.type_tag.0)
            .field(&self.slot)
            .finish()
    }
}
