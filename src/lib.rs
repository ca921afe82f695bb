//! Typed handles and resource registries for engine subsystems.
//!
//! A [`TypeRegistry`] assigns a stable [`TypeTag`] to each registered type,
//! a [`ResourceMap`] owns values of one type and issues copyable
//! [`Handle`]s to them, and [`RefList`] is the growable backing list with a
//! mutation counter for staleness detection.

pub mod handle;
pub mod ref_list;
pub mod registry;
pub mod resource;

pub use handle::Handle;
pub use ref_list::{ListError, RefList};
pub use registry::{RegistryError, TypeInfo, TypeRegistry, TypeTag};
pub use resource::{ResourceError, ResourceMap};

pub mod prelude {
    pub use super::handle::Handle;
    pub use super::ref_list::RefList;
    pub use super::registry::TypeRegistry;
    pub use super::resource::ResourceMap;
}
