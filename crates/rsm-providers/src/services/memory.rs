//! In-memory service locator
//!
//! Components are found the way the framework marks them in the DOM: the
//! host element carries the attribute derived from the component's key
//! (`::counter="counter:c1"`), and the instance is registered under that key.
//! Services and their state are registered by key and visible everywhere.

use async_trait::async_trait;
use dashmap::DashMap;
use rsm_application::key_codec::{attribute_of, camel_to_kebab};
use rsm_domain::constants::KEY_SEPARATOR;
use rsm_domain::error::{Error, Result};
use rsm_domain::ports::{DomNode, ServiceLocator};
use rsm_domain::value_objects::{TypeDescriptor, Value};
use std::sync::Arc;
use tracing::debug;

/// Key-addressed service and component store
#[derive(Debug, Default)]
pub struct MemoryServiceLocator {
    components: DashMap<String, Value>,
    services: DashMap<String, Value>,
    states: DashMap<String, Value>,
}

impl MemoryServiceLocator {
    /// Create an empty locator
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component instance under its key
    pub fn insert_component<K: Into<String>>(&self, key: K, instance: Value) {
        self.components.insert(key.into(), instance);
    }

    /// Register a service, optionally with its state
    pub fn insert_service<K: Into<String>>(&self, key: K, service: Value, state: Option<Value>) {
        let key = key.into();
        if let Some(state) = state {
            self.states.insert(key.clone(), state);
        }
        self.services.insert(key, service);
    }

    /// Host attribute marking components of type `ty`
    pub fn component_attribute(ty: &TypeDescriptor) -> Result<String> {
        attribute_of(&format!("{}{KEY_SEPARATOR}", camel_to_kebab(ty.short_name())))
    }

    fn lookup(map: &DashMap<String, Value>, key: &str, kind: &str) -> Result<Value> {
        attribute_of(key)?;
        map.get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::service(key, format!("no {kind} registered")))
    }
}

#[async_trait]
impl ServiceLocator for MemoryServiceLocator {
    async fn component(&self, scope: Arc<dyn DomNode>, ty: &TypeDescriptor) -> Result<Value> {
        let attribute = Self::component_attribute(ty)?;

        let mut current = Some(scope);
        while let Some(node) = current {
            if let Some(key) = node.attribute(&attribute) {
                debug!(%attribute, %key, "Found component host");
                return Self::lookup(&self.components, &key, "component instance");
            }
            current = node.parent();
        }
        Err(Error::service(
            ty.type_name(),
            format!("no element with '{attribute}' in scope"),
        ))
    }

    async fn service(&self, _scope: Arc<dyn DomNode>, key: &str) -> Result<Value> {
        Self::lookup(&self.services, key, "service")
    }

    async fn service_state(&self, _scope: Arc<dyn DomNode>, key: &str) -> Result<Value> {
        Self::lookup(&self.states, key, "service state")
    }
}
