//! Module loader port

use crate::error::Result;
use crate::value_objects::Value;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Exports of a loaded module by name
pub type ModuleExports = BTreeMap<String, Value>;

/// Asynchronously loads a module by absolute path
///
/// Failures (network, parse, unknown module) are reported as
/// [`Error::Load`](crate::Error::Load) and propagated to callers unchanged.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Load the module at `module_path` and return its exports
    async fn load(&self, module_path: &str) -> Result<ModuleExports>;

    /// Loader name for diagnostics
    fn loader_name(&self) -> &str {
        "unknown"
    }
}
