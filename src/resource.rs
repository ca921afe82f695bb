use ahash::HashMap;
use thiserror::Error;

use crate::{
    handle::Handle,
    registry::{TypeRegistry, TypeTag},
};

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("No {type_name} stored for handle slot {slot}")]
    HandleNotFound {
        type_name: &'static str,
        slot: u64,
    },
}

/// Owning map from [`Handle<T>`] to `T`.
///
/// Values inserted into the map are reachable only through the handle
/// returned by [`insert`](Self::insert); callers hold handles, not
/// references, and borrow the value back through the map for the duration of
/// a call. Slot ids count up monotonically and are never reused, so a handle
/// whose value was removed stays dead.
///
/// Not synchronized; sharing one instance between threads requires external
/// mutual exclusion.
pub struct ResourceMap<T> {
    entries: HashMap<Handle<T>, T>,
    next_slot: u64,
    type_tag: TypeTag,
}

impl<T: 'static> ResourceMap<T> {
    /// Create a map bound to the given registry. Registers `T` if the
    /// registry has not seen it yet; every handle this map issues is stamped
    /// with the resulting tag.
    pub fn new(registry: &mut TypeRegistry) -> Self {
        Self {
            entries: HashMap::default(),
            next_slot: 0,
            type_tag: registry.register::<T>(),
        }
    }

    /// Store `value` and return the handle that refers to it.
    pub fn insert(&mut self, value: T) -> Handle<T> {
        let handle = Handle::new(self.type_tag, self.next_slot);
        self.next_slot += 1;
        self.entries.insert(handle, value);

        tracing::trace!(
            "Stored {} in slot {}.",
            std::any::type_name::<T>(),
            handle.slot()
        );

        handle
    }

    pub fn get(&self, handle: Handle<T>) -> Result<&T, ResourceError> {
        self.entries
            .get(&handle)
            .ok_or_else(|| Self::not_found(handle))
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, ResourceError> {
        self.entries
            .get_mut(&handle)
            .ok_or_else(|| Self::not_found(handle))
    }

    /// Replace the value stored for `handle`, returning the previous value.
    /// Fails if the handle has no entry; this never inserts.
    pub fn set(&mut self, handle: Handle<T>, value: T) -> Result<T, ResourceError> {
        match self.entries.get_mut(&handle) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(Self::not_found(handle)),
        }
    }

    /// Remove and return the value stored for `handle`. Removing a handle
    /// with no entry is a no-op returning `None`.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        self.entries.remove(&handle)
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Amount of values currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registry tag stamped into every handle this map issues.
    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    fn not_found(handle: Handle<T>) -> ResourceError {
        ResourceError::HandleNotFound {
            type_name: std::any::type_name::<T>(),
            slot: handle.slot(),
        }
    }
}
