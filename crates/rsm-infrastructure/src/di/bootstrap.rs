//! Composition root
//!
//! Wires one application root: the protocol registry seeded from the
//! configured bases, a symbol resolver over a fresh in-memory cache, and the
//! injection scope every injector of the root shares.
//!
//! ```text
//! AppConfig ──bases──▶ ProtocolRegistry ─┐
//!           ──resolver──────────────────▶ SymbolResolver ◀── ModuleLoader
//!                                                │            MemorySymbolCache
//!           ──injector──▶ InjectionScope ◀───────┘
//!                               ▲
//!                         ServiceLocator
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = AppContext::build(config, loader, locator, Some(document))?;
//! let injector = context.injector_for(element).expect("no injection boundary");
//! let value = injector.call(&handler, None, vec![]).await?;
//! ```

use crate::config::AppConfig;
use rsm_application::{InjectionScope, Injector, ProtocolRegistry, SymbolResolver};
use rsm_domain::error::Result;
use rsm_domain::ports::{Document, DomNode, ModuleLoader, ServiceLocator};
use rsm_providers::cache::MemorySymbolCache;
use std::sync::Arc;
use tracing::info;

/// Application context holding the wired core services
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    registry: Arc<ProtocolRegistry>,
    resolver: Arc<SymbolResolver>,
    scope: Arc<InjectionScope>,
}

impl AppContext {
    /// Build the context for one application root
    ///
    /// With a `document`, paths outside every configured base fall back to a
    /// configuration derived from the document's base URI.
    pub fn build(
        config: AppConfig,
        loader: Arc<dyn ModuleLoader>,
        locator: Arc<dyn ServiceLocator>,
        document: Option<Arc<dyn Document>>,
    ) -> Result<Self> {
        let registry = Arc::new(match document {
            Some(document) => ProtocolRegistry::with_document(document),
            None => ProtocolRegistry::new(),
        });
        for base in &config.bases {
            registry.register(base.clone())?;
        }

        let resolver = Arc::new(SymbolResolver::with_options(
            Arc::clone(&registry),
            loader,
            Arc::new(MemorySymbolCache::new()),
            config.resolver.clone().into(),
        ));

        let scope = Arc::new(InjectionScope::with_boundary_attribute(
            Arc::clone(&resolver),
            locator,
            config.injector.boundary_attribute.clone(),
        ));

        info!(
            bases = registry.len(),
            boundary_attribute = scope.boundary_attribute(),
            "Application context initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            registry,
            resolver,
            scope,
        })
    }

    /// Protocol registry
    pub fn registry(&self) -> Arc<ProtocolRegistry> {
        Arc::clone(&self.registry)
    }

    /// Symbol resolver
    pub fn resolver(&self) -> Arc<SymbolResolver> {
        Arc::clone(&self.resolver)
    }

    /// Scope shared by every injector of this root
    pub fn scope(&self) -> Arc<InjectionScope> {
        Arc::clone(&self.scope)
    }

    /// Injector of the nearest injection boundary at or above `element`
    pub fn injector_for(&self, element: Arc<dyn DomNode>) -> Option<Injector> {
        Injector::closest(element, self.scope())
    }
}
