use std::any::TypeId;

use ahash::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Type not registered ({0})")]
    UnregisteredType(&'static str),

    #[error("No type registered with tag {0:?}")]
    InvalidTypeTag(TypeTag),
}

/// Tag assigned to a type by a [`TypeRegistry`]. Tags are dense, starting at
/// zero, and stable for the lifetime of the registry that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(pub(crate) u32);

impl TypeTag {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// What the registry records for each registered type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: &'static str,
}

/// Assigns a [`TypeTag`] to each distinct type on first sight.
///
/// A registry is an explicit value, not a global: every [`ResourceMap`]
/// built from the same registry sees the same tag for a given type, while
/// separate registries number their types independently.
///
/// Not synchronized; sharing one instance between threads requires external
/// mutual exclusion.
///
/// [`ResourceMap`]: crate::resource::ResourceMap
#[derive(Default)]
pub struct TypeRegistry {
    tags: HashMap<TypeId, TypeTag>,
    // Insertion order; a tag indexes into this list.
    types: Vec<TypeInfo>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`, assigning it the next sequential tag. Registering a type
    /// that is already known is a no-op returning the existing tag.
    pub fn register<T: 'static>(&mut self) -> TypeTag {
        let id = TypeId::of::<T>();
        if let Some(tag) = self.tags.get(&id) {
            return *tag;
        }

        let name = std::any::type_name::<T>();
        let tag = TypeTag(self.types.len() as u32);
        self.tags.insert(id, tag);
        self.types.push(TypeInfo { id, name });

        tracing::debug!("Registered type {name} with tag {}.", tag.0);

        tag
    }

    /// The tag previously assigned to `T`.
    pub fn tag_of<T: 'static>(&self) -> Result<TypeTag, RegistryError> {
        self.tags
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or_else(|| RegistryError::UnregisteredType(std::any::type_name::<T>()))
    }

    /// The type registered with the given tag.
    pub fn type_of(&self, tag: TypeTag) -> Result<TypeInfo, RegistryError> {
        self.types
            .get(tag.0 as usize)
            .copied()
            .ok_or(RegistryError::InvalidTypeTag(tag))
    }

    /// Amount of types registered so far.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
