//! Statically declared resources.
//!
//! Each file declares one resource: its path, its models and the operations
//! of every API under it. To add one:
//! 1. Create the file here and implement [`ResourceDefinition`]
//! 2. Export it below
//! 3. Add it to [`declare_all_resources`]

mod pets;
mod store;

pub use pets::PetsResource;
pub use store::StoreResource;

use super::registry::Registry;
use super::resource::{ResourceOptions, SharedResource};

/// A resource declared in code.
pub trait ResourceDefinition {
    /// Resource path, relative to the registry's swagger path.
    const PATH: &'static str;

    /// Options the resource is created with, typically its models.
    fn options() -> ResourceOptions {
        ResourceOptions::default()
    }

    /// Declare the operations of every API under this resource.
    fn declare(resource: &SharedResource);
}

/// Create a resource from its definition and declare its operations.
pub fn declare_resource<R: ResourceDefinition>(registry: &Registry) -> SharedResource {
    let resource = registry.create_resource(R::PATH, R::options());
    R::declare(&resource);
    resource
}

/// Declare every resource defined in this module, in catalog order.
pub fn declare_all_resources(registry: &Registry) -> Vec<SharedResource> {
    vec![
        declare_resource::<PetsResource>(registry),
        declare_resource::<StoreResource>(registry),
    ]
}
