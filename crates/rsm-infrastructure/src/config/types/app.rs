//! Main application configuration

use super::{InjectorConfig, LoggingConfig, ResolverConfig};
use rsm_domain::value_objects::BaseConfiguration;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging
    pub logging: LoggingConfig,

    /// Symbol resolver naming conventions
    pub resolver: ResolverConfig,

    /// Injection boundaries
    pub injector: InjectorConfig,

    /// Base configurations registered at startup
    pub bases: Vec<BaseConfiguration>,
}
