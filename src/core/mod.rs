//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the discovery
//! server, including error handling, configuration, the in-process route
//! table and the HTTP transport that serves it.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::RouteTable;
pub use transport::{HttpConfig, TransportError, TransportResult};

#[cfg(feature = "http")]
pub use transport::http::HttpTransport;
