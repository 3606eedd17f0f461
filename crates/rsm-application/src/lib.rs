//! Application Layer - Resumable Core
//!
//! Domain services that implement lazy symbol resolution and hierarchical
//! dependency injection on top of the ports defined in `rsm-domain`.
//!
//! ## Services
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`domain_services::key_codec`] | Property bag ↔ attribute-safe key text |
//! | [`domain_services::protocol_registry`] | Base URIs and scheme aliases |
//! | [`domain_services::symbol_resolver`] | Deduplicated, cached symbol loading |
//! | [`injector`] | Per-element scopes that resolve providers and invoke functions |
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `rsm-domain`: value objects, errors and ports
//! - Pure Rust libraries for futures, URLs and logging

pub mod domain_services;
pub mod injector;

pub use domain_services::*;
pub use injector::*;
