//! Symbol cache keys and params

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded `name=value` params of a symbolic reference, in declaration order
pub type SymbolParams = Vec<(String, String)>;

/// Normalized identity of a lazily loaded symbol
///
/// Two references that normalize to the same module path and export name
/// share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolKey {
    /// Absolute, loadable module path (no fragment or query)
    pub module_path: String,
    /// Export name inside the module
    pub symbol: String,
}

impl SymbolKey {
    /// Create a new symbol key
    pub fn new<P: Into<String>, S: Into<String>>(module_path: P, symbol: S) -> Self {
        Self {
            module_path: module_path.into(),
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.module_path, self.symbol)
    }
}
