//! # Resumable Core - Provider Implementations
//!
//! Implementations of the ports defined in `rsm-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Symbol cache | `SymbolCache` | [`cache::MemorySymbolCache`] |
//! | Module loader | `ModuleLoader` | [`loader::StaticModuleLoader`] |
//! | DOM tree | `DomNode`, `Document` | [`dom::MemoryElement`], [`dom::MemoryDocument`] |
//! | Services | `ServiceLocator` | [`services::MemoryServiceLocator`] |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! rsm-providers = { version = "0.1", default-features = false, features = ["cache-dashmap"] }
//! ```

// Re-export rsm-domain types commonly used with providers
pub use rsm_domain::error::{Error, Result};
pub use rsm_domain::ports::{
    CacheEntry, Document, DomNode, ModuleExports, ModuleLoader, ServiceLocator, SymbolCache,
};

#[cfg(feature = "cache-dashmap")]
pub mod cache;
#[cfg(feature = "dom-memory")]
pub mod dom;
#[cfg(feature = "loader-static")]
pub mod loader;
#[cfg(feature = "services-memory")]
pub mod services;
