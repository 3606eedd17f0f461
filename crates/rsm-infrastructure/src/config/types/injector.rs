//! Injector configuration types

use rsm_domain::constants::BOUNDARY_ATTRIBUTE;
use serde::{Deserialize, Serialize};

/// Injection boundary settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectorConfig {
    /// Attribute marking elements that own an injector
    pub boundary_attribute: String,
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            boundary_attribute: BOUNDARY_ATTRIBUTE.to_string(),
        }
    }
}
