//! Catalog domain module.
//!
//! This module holds the self-describing API catalog: the document model
//! (resource -> API path -> ordered operations) and the registry that
//! renders it into Swagger 1.0 discovery documents.
//!
//! ## Architecture
//!
//! - `operation.rs` - HTTP methods and operation metadata
//! - `resource.rs` - Resources and the APIs they own
//! - `registry.rs` - The catalog of resources and document rendering
//! - `document.rs` - Wire shapes of the discovery documents
//! - `binding.rs` - The server capability discovery routes are bound to
//! - `definitions/` - Resources declared in code (one file per resource)

pub mod definitions;
mod binding;
mod document;
mod error;
mod operation;
mod registry;
mod resource;

pub use binding::{DiscoveryHandler, DiscoveryRequest, DiscoveryServer};
pub use definitions::{ResourceDefinition, declare_all_resources};
pub use document::{CatalogDocument, CatalogEntry, Envelope, ResourceDocument, SWAGGER_VERSION};
pub use error::CatalogError;
pub use operation::{ErrorResponse, HttpMethod, Operation, ParamType, Parameter};
pub use registry::{DEFAULT_API_VERSION, DEFAULT_DISCOVERY_URL, DiscoveryOptions, Registry};
pub use resource::{Api, Resource, ResourceOptions, SharedResource};
