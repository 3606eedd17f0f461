//! Base-URI / protocol registry
//!
//! Process-wide registry of base URIs and scheme aliases. Entries are kept
//! sorted longest-base-first so the most specific base wins when several
//! prefix the same path; multi-tenant hosts register one entry per tenant.
//!
//! ```text
//! register("/app/")      ┐
//! register("/app/sub/")  ┘ → [file:///app/sub/, file:///app/]
//!
//! resolve("/app/sub/x")    → file:///app/sub/
//! resolve("/app/y")        → file:///app/
//! ```

use rsm_domain::constants::FILE_SCHEME_PREFIX;
use rsm_domain::error::{Error, Result};
use rsm_domain::ports::Document;
use rsm_domain::value_objects::{BaseConfiguration, Configuration, ProtocolAliases};
use std::sync::{Arc, LazyLock, OnceLock, PoisonError, RwLock};
use tracing::debug;
use url::Url;

static SCHEME_PREFIX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):(.*)$").expect("Invalid regex")
});

/// Registry of base configurations
#[derive(Default)]
pub struct ProtocolRegistry {
    entries: RwLock<Vec<Arc<Configuration>>>,
    document: Option<Arc<dyn Document>>,
    derived: OnceLock<Arc<Configuration>>,
}

impl ProtocolRegistry {
    /// Create an empty registry without a document host
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that falls back to `document`'s base URI
    pub fn with_document(document: Arc<dyn Document>) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }

    /// Register a configuration
    ///
    /// Re-registering an identical base URI replaces its aliases.
    pub fn register(&self, config: BaseConfiguration) -> Result<Arc<Configuration>> {
        let configuration = Arc::new(Configuration {
            base_uri: normalize_base_uri(&config.base_uri)?,
            protocol: config.protocol,
        });

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|entry| entry.base_uri != configuration.base_uri);
        let position = entries
            .iter()
            .position(|entry| entry.specificity() < configuration.specificity())
            .unwrap_or(entries.len());
        entries.insert(position, Arc::clone(&configuration));

        debug!(base_uri = %configuration.base_uri, "Registered base configuration");
        Ok(configuration)
    }

    /// Most specific registered configuration covering `path`, if any
    pub fn lookup(&self, path: &str) -> Result<Option<Arc<Configuration>>> {
        let url = to_url(path)?;
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.iter().find(|entry| entry.covers(&url)).cloned())
    }

    /// Configuration covering `path`
    ///
    /// Falls back to a default derived (once) from the document host; fails
    /// with `ConfigurationNotFound` when there is no host either.
    pub fn resolve(&self, path: &str) -> Result<Arc<Configuration>> {
        if let Some(configuration) = self.lookup(path)? {
            return Ok(configuration);
        }

        let Some(document) = &self.document else {
            let normalized = to_url(path)?.to_string();
            return Err(Error::configuration_not_found(normalized, self.known()));
        };

        if let Some(derived) = self.derived.get() {
            return Ok(Arc::clone(derived));
        }
        let derived = Arc::new(Configuration {
            base_uri: normalize_base_uri(&document.base_uri())?,
            protocol: ProtocolAliases::new(),
        });
        debug!(base_uri = %derived.base_uri, "Derived default configuration from document");
        Ok(Arc::clone(self.derived.get_or_init(|| derived)))
    }

    /// Base URIs of every registered configuration, most specific first
    pub fn known(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| entry.base_uri.to_string())
            .collect()
    }

    /// Number of registered configurations
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splice a registered scheme alias into `reference`
///
/// `foo:/bar` with `{foo: "somePath"}` becomes `somePath/bar`; references with
/// an unregistered scheme, or none, are returned unchanged.
pub fn adjust_protocol(protocol: &ProtocolAliases, reference: &str) -> String {
    let Some(captures) = SCHEME_PREFIX.captures(reference) else {
        return reference.to_string();
    };
    match protocol.get(&captures[1]) {
        Some(alias) => format!(
            "{}/{}",
            alias.trim_end_matches('/'),
            captures[2].trim_start_matches('/')
        ),
        None => reference.to_string(),
    }
}

/// Absolute URL for `text`; bare absolute paths become `file://` URLs
pub fn to_url(text: &str) -> Result<Url> {
    let absolute = if text.starts_with('/') {
        format!("{FILE_SCHEME_PREFIX}{text}")
    } else {
        text.to_string()
    };
    Url::parse(&absolute).map_err(|e| Error::invalid_reference(text, e.to_string()))
}

/// Absolute base URI ending in `/`, without query or fragment
pub fn normalize_base_uri(base: &str) -> Result<Url> {
    let mut url = to_url(base)?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_reference(base, "not usable as a base URI"));
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
