//! Symbol resolver
//!
//! Turns a symbolic reference (`[scheme:][/path][#export[?params]]`) into a
//! value exported by a lazily loaded module. Loads are deduplicated through
//! the injected [`SymbolCache`]:
//!
//! ```text
//! resolve(ctx, "./widget#render")
//!        │
//!        ▼  to_absolute → https://app/widget#render
//!        ▼  key        → (https://app/widget.js, render)
//!   ┌────┴──────────────┬────────────────────┬──────────────────────┐
//!   │ Settled           │ Pending            │ empty                │
//!   │ → Ready(value)    │ → join shared load │ → insert Pending,    │
//!   │   (no await)      │                    │   load, settle/evict │
//!   └───────────────────┴────────────────────┴──────────────────────┘
//! ```
//!
//! The cache never invalidates on its own; [`SymbolResolver::seed`] is the
//! single primitive for seeding and evicting. A failed load evicts its own
//! pending entry, so the next `resolve` retries.

use crate::domain_services::protocol_registry::{ProtocolRegistry, adjust_protocol, to_url};
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use rsm_domain::constants::{
    DEFAULT_EXPORT_NAME, LOADABLE_EXTENSION, SOURCE_EXTENSIONS, SYMBOL_PARAM_SEPARATOR,
};
use rsm_domain::error::{Error, Result};
use rsm_domain::ports::{CacheEntry, Document, DomNode, ModuleLoader, SharedLoad, SymbolCache};
use rsm_domain::value_objects::{Configuration, SymbolKey, SymbolParams, Value};
use std::fmt;
use std::future::IntoFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use url::Url;

/// What a reference is resolved relative to
#[derive(Clone, Copy)]
pub enum ResolveContext<'a> {
    /// An element; its owning document's base URI is used
    Element(&'a dyn DomNode),
    /// A document; its base URI is used
    Document(&'a dyn Document),
    /// A base URI given as text
    Base(&'a str),
    /// A registered configuration; its base URI and aliases are used
    Config(&'a Configuration),
}

/// Naming conventions applied while normalizing references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Export used when a fragment is empty
    pub default_export: String,
    /// Extension every module path is rewritten to
    pub loadable_extension: String,
    /// Extensions rewritten to `loadable_extension`
    pub source_extensions: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            default_export: DEFAULT_EXPORT_NAME.to_string(),
            loadable_extension: LOADABLE_EXTENSION.to_string(),
            source_extensions: SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Outcome of [`SymbolResolver::resolve`]
///
/// Warm symbols come back `Ready` without any scheduling delay; cold ones
/// come back as the shared in-flight load. Awaiting either yields the value.
#[derive(Clone)]
pub enum Resolution {
    /// Value already in the cache
    Ready(Value),
    /// Load in progress, shared with every other caller of the same symbol
    Pending(SharedLoad),
}

impl Resolution {
    /// Whether the value was available synchronously
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The value, if available synchronously
    pub fn ready(&self) -> Option<&Value> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending(_) => None,
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

impl From<CacheEntry> for Resolution {
    fn from(entry: CacheEntry) -> Self {
        match entry {
            CacheEntry::Settled(value) => Self::Ready(value),
            CacheEntry::Pending { load, .. } => Self::Pending(load),
        }
    }
}

impl IntoFuture for Resolution {
    type Output = Result<Value>;
    type IntoFuture = BoxFuture<'static, Result<Value>>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(value) => future::ready(Ok(value)).boxed(),
            Self::Pending(load) => load.boxed(),
        }
    }
}

/// Resolves symbolic references to values, loading each module at most once
pub struct SymbolResolver {
    registry: Arc<ProtocolRegistry>,
    loader: Arc<dyn ModuleLoader>,
    cache: Arc<dyn SymbolCache>,
    options: ResolverOptions,
    next_attempt: AtomicU64,
}

impl SymbolResolver {
    /// Create a resolver over `cache`, which it owns from now on
    pub fn new(
        registry: Arc<ProtocolRegistry>,
        loader: Arc<dyn ModuleLoader>,
        cache: Arc<dyn SymbolCache>,
    ) -> Self {
        Self::with_options(registry, loader, cache, ResolverOptions::default())
    }

    /// Create a resolver with custom naming conventions
    pub fn with_options(
        registry: Arc<ProtocolRegistry>,
        loader: Arc<dyn ModuleLoader>,
        cache: Arc<dyn SymbolCache>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            registry,
            loader,
            cache,
            options,
            next_attempt: AtomicU64::new(0),
        }
    }

    /// The registry used for protocol adjustment
    pub fn registry(&self) -> &Arc<ProtocolRegistry> {
        &self.registry
    }

    /// Naming conventions in effect
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Number of cached (settled or in-flight) symbols
    pub fn cached_symbols(&self) -> usize {
        self.cache.len()
    }

    /// Absolute URL of `reference` relative to `context`
    ///
    /// Scheme aliases come from the context's configuration, or from the
    /// registered configuration covering the base; without one the reference
    /// is used unchanged.
    pub fn to_absolute(&self, context: ResolveContext<'_>, reference: &str) -> Result<Url> {
        let (base, protocol) = match context {
            ResolveContext::Element(element) => {
                let base = element.base_uri().ok_or_else(|| {
                    Error::invalid_reference(reference, "element is not attached to a document")
                })?;
                (to_url(&base)?, None)
            }
            ResolveContext::Document(document) => (to_url(&document.base_uri())?, None),
            ResolveContext::Base(base) => (to_url(base)?, None),
            ResolveContext::Config(config) => (config.base_uri.clone(), Some(&config.protocol)),
        };

        let adjusted = match protocol {
            Some(protocol) => adjust_protocol(protocol, reference),
            None => match self.registry.lookup(base.as_str())? {
                Some(config) => adjust_protocol(&config.protocol, reference),
                None => reference.to_string(),
            },
        };

        base.join(&adjusted)
            .map_err(|e| Error::invalid_reference(reference, e.to_string()))
    }

    /// Loadable module path: no fragment or query, source extensions rewritten
    pub fn module_path_of(&self, url: &Url) -> String {
        let mut module = url.clone();
        module.set_fragment(None);
        module.set_query(None);

        let path = module.path().to_string();
        let (dir, file) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
        let rewritten = match file.rsplit_once('.') {
            _ if file.is_empty() => None,
            Some((stem, ext)) if self.options.source_extensions.iter().any(|s| s == ext) => {
                Some(format!("{dir}/{stem}.{}", self.options.loadable_extension))
            }
            Some(_) => None,
            None => Some(format!("{path}.{}", self.options.loadable_extension)),
        };
        if let Some(rewritten) = rewritten {
            module.set_path(&rewritten);
        }
        module.to_string()
    }

    /// Export name: fragment up to the param separator, default when empty
    pub fn symbol_name_of(&self, url: &Url) -> String {
        let fragment = url.fragment().unwrap_or_default();
        let name = fragment
            .split(SYMBOL_PARAM_SEPARATOR)
            .next()
            .unwrap_or_default();
        if name.is_empty() {
            self.options.default_export.clone()
        } else {
            name.to_string()
        }
    }

    /// Params encoded after the param separator in the fragment
    pub fn symbol_params_of(&self, url: &Url) -> SymbolParams {
        url.fragment()
            .and_then(|fragment| fragment.split_once(SYMBOL_PARAM_SEPARATOR))
            .map(|(_, params)| {
                url::form_urlencoded::parse(params.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cache key `reference` normalizes to
    pub fn key_of(&self, context: ResolveContext<'_>, reference: &str) -> Result<SymbolKey> {
        let url = self.to_absolute(context, reference)?;
        Ok(SymbolKey::new(
            self.module_path_of(&url),
            self.symbol_name_of(&url),
        ))
    }

    /// Resolve `reference` relative to `context`
    ///
    /// A cold symbol gets a pending cache entry holding its load. The load
    /// runs once something polls it: a `Pending` resolution dropped without
    /// being awaited leaves the entry in place, and the next caller that
    /// awaits the symbol drives that same load.
    pub fn resolve(&self, context: ResolveContext<'_>, reference: &str) -> Result<Resolution> {
        Ok(self.resolve_key(self.key_of(context, reference)?))
    }

    /// Resolve and await `reference`
    pub async fn resolve_value(&self, context: ResolveContext<'_>, reference: &str) -> Result<Value> {
        self.resolve(context, reference)?.await
    }

    /// Resolve an already normalized key
    pub fn resolve_key(&self, key: SymbolKey) -> Resolution {
        if let Some(entry) = self.cache.get(&key) {
            debug!(symbol = %key, settled = entry.settled().is_some(), "Symbol cache hit");
            return entry.into();
        }

        let id = self.next_attempt.fetch_add(1, Ordering::Relaxed);
        let load = self.start_load(key.clone(), id);
        let entry = self.cache.get_or_insert(key, CacheEntry::Pending { id, load });
        entry.into()
    }

    /// Seed `key` with a constant, or evict it with `None`
    pub fn seed(&self, key: SymbolKey, value: Option<Value>) {
        match value {
            Some(value) => {
                debug!(symbol = %key, "Seeding symbol");
                self.cache.set(key, CacheEntry::Settled(value));
            }
            None => {
                debug!(symbol = %key, "Evicting symbol");
                self.cache.delete(&key);
            }
        }
    }

    /// Seed or evict the key `reference` normalizes to
    pub fn seed_reference(
        &self,
        context: ResolveContext<'_>,
        reference: &str,
        value: Option<Value>,
    ) -> Result<SymbolKey> {
        let key = self.key_of(context, reference)?;
        self.seed(key.clone(), value);
        Ok(key)
    }

    // The future does nothing until first polled, so a copy that loses the
    // `get_or_insert` race is dropped without ever reaching the loader.
    fn start_load(&self, key: SymbolKey, id: u64) -> SharedLoad {
        let loader = Arc::clone(&self.loader);
        let cache = Arc::downgrade(&self.cache);

        async move {
            debug!(symbol = %key, loader = loader.loader_name(), "Loading module");
            let outcome = loader.load(&key.module_path).await.and_then(|exports| {
                exports.get(&key.symbol).cloned().ok_or_else(|| {
                    Error::missing_export(
                        &key.module_path,
                        &key.symbol,
                        exports.keys().cloned().collect(),
                    )
                })
            });

            if let Some(cache) = cache.upgrade() {
                match &outcome {
                    Ok(value) => {
                        cache.replace_pending(&key, id, Some(CacheEntry::Settled(value.clone())));
                    }
                    Err(error) => {
                        warn!(symbol = %key, error = %error, "Symbol load failed; evicting");
                        cache.replace_pending(&key, id, None);
                    }
                }
            }
            outcome
        }
        .boxed()
        .shared()
    }
}
