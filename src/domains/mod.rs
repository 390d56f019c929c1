//! Domains module containing business logic organized by bounded contexts.
//!
//! The catalog is currently the only domain: it owns the declared API
//! surface and renders it into discovery documents.

pub mod catalog;
