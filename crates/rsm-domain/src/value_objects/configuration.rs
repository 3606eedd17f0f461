//! Base-URI / protocol configurations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Scheme → replacement prefix map (`{"foo": "somePath"}` rewrites `foo:/bar`)
pub type ProtocolAliases = BTreeMap<String, String>;

/// Configuration as written by an application (or in `rsm.toml`)
///
/// # Example
///
/// ```
/// use rsm_domain::BaseConfiguration;
///
/// let config = BaseConfiguration::new("https://app.example/")
///     .with_protocol("cdn", "https://cdn.example/assets");
/// assert_eq!(config.protocol["cdn"], "https://cdn.example/assets");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseConfiguration {
    /// Base URI relative references resolve against
    pub base_uri: String,
    /// Scheme aliases spliced into references before resolution
    #[serde(default)]
    pub protocol: ProtocolAliases,
}

impl BaseConfiguration {
    /// Create a configuration without scheme aliases
    pub fn new<S: Into<String>>(base_uri: S) -> Self {
        Self {
            base_uri: base_uri.into(),
            protocol: ProtocolAliases::new(),
        }
    }

    /// Add a scheme alias
    pub fn with_protocol<S: Into<String>, A: Into<String>>(mut self, scheme: S, alias: A) -> Self {
        self.protocol.insert(scheme.into(), alias.into());
        self
    }
}

/// Registered configuration with a normalized base URI
///
/// The base URI is absolute and always ends in `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Normalized base URI
    pub base_uri: Url,
    /// Scheme aliases
    pub protocol: ProtocolAliases,
}

impl Configuration {
    /// Length of the base URI text, used to rank more specific bases first
    pub fn specificity(&self) -> usize {
        self.base_uri.as_str().len()
    }

    /// Whether `url` lives under this configuration's base URI
    pub fn covers(&self, url: &Url) -> bool {
        url.as_str().starts_with(self.base_uri.as_str())
    }
}
