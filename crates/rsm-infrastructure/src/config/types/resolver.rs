//! Symbol resolver configuration types

use rsm_application::ResolverOptions;
use serde::{Deserialize, Serialize};

/// Naming conventions applied by the symbol resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Export used when a reference has no fragment
    pub default_export: String,

    /// Extension module paths are rewritten to
    pub loadable_extension: String,

    /// Source extensions rewritten to `loadable_extension`
    pub source_extensions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverOptions::default().into()
    }
}

impl From<ResolverOptions> for ResolverConfig {
    fn from(options: ResolverOptions) -> Self {
        Self {
            default_export: options.default_export,
            loadable_extension: options.loadable_extension,
            source_extensions: options.source_extensions,
        }
    }
}

impl From<ResolverConfig> for ResolverOptions {
    fn from(config: ResolverConfig) -> Self {
        Self {
            default_export: config.default_export,
            loadable_extension: config.loadable_extension,
            source_extensions: config.source_extensions,
        }
    }
}
