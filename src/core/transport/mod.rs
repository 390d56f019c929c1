//! Transport layer for the discovery server.
//!
//! The HTTP transport (feature: `http`, enabled by default) serves the
//! routes held in a [`RouteTable`](crate::core::RouteTable). Without the
//! feature the catalog still works in doc-only mode, rendering documents
//! through [`Registry`](crate::domains::catalog::Registry) directly.

mod config;
mod error;

#[cfg(feature = "http")]
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
