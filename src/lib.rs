//! Swagger 1.0 discovery catalog.
//!
//! This crate lets a server declare, at startup, a tree of HTTP resources and
//! the operations each one supports, and answer discovery requests with a
//! machine-readable description of that tree.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the in-process route table and
//!   the HTTP transport that serves it
//! - **domains**: Business logic organized by bounded contexts
//!   - **catalog**: Resources, operations, the registry and document rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use swagger_doc::core::RouteTable;
//! use swagger_doc::domains::catalog::{DiscoveryOptions, Operation, Registry, ResourceOptions};
//!
//! let routes = RouteTable::new();
//! let registry = Registry::new();
//! registry.configure(Arc::new(routes.clone()), DiscoveryOptions::new().swagger_path("/docs"));
//!
//! let pets = registry.create_resource("/pets", ResourceOptions::default());
//! pets.get("/pets", Some("List pets"), Operation::new().response_class("List[Pet]"));
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, Result, RouteTable};
pub use domains::catalog::{DiscoveryOptions, Operation, Registry, ResourceOptions};
