//! # Resumable Core
//!
//! Lazy symbol resolution and hierarchical dependency injection for UIs that
//! resume on the client from server-rendered markup.
//!
//! - **Symbol resolver**: turns `./widget#render` into the `render` export of
//!   `https://app/widget.js`, loading each module at most once no matter how
//!   many callers race for it
//! - **Key codec**: maps a property bag to an attribute-safe key
//!   (`todo-item:groceries:milk`) and back
//! - **Protocol registry**: base URIs and scheme aliases, most specific first
//! - **Injector**: per-element scopes that resolve a function's providers
//!   concurrently and call it with the results in declaration order
//!
//! ## Example
//!
//! ```
//! use rsm::application::{InjectedFn, provide_value};
//! use rsm::infrastructure::{AppContext, config::ConfigBuilder};
//! use rsm::providers::{dom::MemoryDocument, loader::StaticModuleLoader};
//! use rsm::providers::services::MemoryServiceLocator;
//! use rsm::{Document, Value};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rsm::Result<()> {
//! let document = MemoryDocument::new("https://app/");
//! let context = AppContext::build(
//!     ConfigBuilder::new().build(),
//!     Arc::new(StaticModuleLoader::new()),
//!     Arc::new(MemoryServiceLocator::new()),
//!     Some(document.clone() as Arc<dyn Document>),
//! )?;
//!
//! let root = document.create_element("main");
//! root.set_attribute("::injector", "");
//! let injector = context.injector_for(root.as_node()).unwrap();
//!
//! let double = InjectedFn::builder()
//!     .provider(provide_value(Value::new(21u32)))
//!     .build(|_, args| async move {
//!         let n = args[0].downcast_ref::<u32>().copied().unwrap_or_default();
//!         Ok(Value::new(n * 2))
//!     });
//! let result = injector.call(&double, None, vec![]).await?;
//! assert_eq!(result.downcast_ref::<u32>(), Some(&42));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, value objects and ports
//! - `application` - key codec, protocol registry, symbol resolver, injector
//! - `providers` - in-memory cache, loader, DOM tree and service locator
//! - `infrastructure` - configuration, logging and the composition root

/// Domain layer - errors, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use rsm_domain::*;
}

/// Application layer - resolver and injector
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use rsm_application::*;
}

/// Providers - in-memory port implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use rsm_providers::*;
}

/// Infrastructure layer - config, logging and composition root
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use rsm_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;
pub use domain::ports::{Document, DomNode, ModuleLoader, ServiceLocator, SymbolCache};

// Re-export the core services at the crate root
pub use application::{InjectedFn, Injector, Resolution, ResolveContext, SymbolResolver};
pub use infrastructure::AppContext;
