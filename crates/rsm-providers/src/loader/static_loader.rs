//! Static module loader
//!
//! Serves modules registered up front, keyed by absolute module path. Useful
//! for hosts that bundle their symbols into the binary, and as a loader fake:
//! it counts loads per path, can simulate latency, and can be told to fail
//! the next N loads of a path.
//!
//! ## Example
//!
//! ```
//! use rsm_domain::Value;
//! use rsm_providers::loader::StaticModuleLoader;
//!
//! let loader = StaticModuleLoader::new()
//!     .with_module("https://app/widget.js", [("render", Value::new("render-fn"))]);
//! assert_eq!(loader.load_count("https://app/widget.js"), 0);
//! ```

use async_trait::async_trait;
use rsm_domain::error::{Error, Result};
use rsm_domain::ports::{ModuleExports, ModuleLoader};
use rsm_domain::value_objects::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

/// In-memory module loader
#[derive(Debug, Default)]
pub struct StaticModuleLoader {
    modules: RwLock<HashMap<String, ModuleExports>>,
    loads: RwLock<HashMap<String, usize>>,
    failures: RwLock<HashMap<String, (usize, String)>>,
    latency: Option<Duration>,
}

impl StaticModuleLoader {
    /// Create a loader without modules
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module
    pub fn with_module<P, I, N>(self, path: P, exports: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
        N: Into<String>,
    {
        self.insert_module(path, exports);
        self
    }

    /// Delay every load by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace a module
    pub fn insert_module<P, I, N>(&self, path: P, exports: I)
    where
        P: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
        N: Into<String>,
    {
        let exports = exports
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        self.modules
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), exports);
    }

    /// Make the next `times` loads of `path` fail with `message`
    pub fn fail_next<P: Into<String>, M: Into<String>>(&self, path: P, times: usize, message: M) {
        if times == 0 {
            return;
        }
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), (times, message.into()));
    }

    /// Number of loads started for `path`
    pub fn load_count(&self, path: &str) -> usize {
        self.loads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    /// Number of loads started for any path
    pub fn total_loads(&self) -> usize {
        self.loads
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    fn take_failure(&self, path: &str) -> Option<String> {
        let mut failures = self.failures.write().unwrap_or_else(PoisonError::into_inner);
        let (remaining, message) = failures.get_mut(path)?;
        let message = message.clone();
        *remaining -= 1;
        if *remaining == 0 {
            failures.remove(path);
        }
        Some(message)
    }
}

#[async_trait]
impl ModuleLoader for StaticModuleLoader {
    async fn load(&self, module_path: &str) -> Result<ModuleExports> {
        *self
            .loads
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(module_path.to_string())
            .or_insert(0) += 1;
        debug!(module_path, "Static module load");

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(message) = self.take_failure(module_path) {
            return Err(Error::load(module_path, message));
        }

        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(module_path)
            .cloned()
            .ok_or_else(|| Error::load(module_path, "module not found"))
    }

    fn loader_name(&self) -> &str {
        "static"
    }
}
