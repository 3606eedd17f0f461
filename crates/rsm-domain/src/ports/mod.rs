//! Ports
//!
//! Contracts between the core and its host. The core never owns the DOM,
//! the module system or the service registry; it only talks to them through
//! these traits.
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | [`DomNode`], [`Document`] | the host's DOM (in-memory tree in `rsm-providers`) |
//! | [`ModuleLoader`] | the host's dynamic `import` |
//! | [`SymbolCache`] | `rsm-providers::cache` |
//! | [`ServiceLocator`] | the surrounding framework's service registry |

pub mod cache;
pub mod dom;
pub mod loader;
pub mod services;

pub use cache::{CacheEntry, SharedLoad, SymbolCache};
pub use dom::{Document, DomNode};
pub use loader::{ModuleExports, ModuleLoader};
pub use services::ServiceLocator;
