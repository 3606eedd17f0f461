//! Service locator port
//!
//! The component/service registry belongs to the surrounding framework. The
//! injector only needs "given a type or key, produce an instance or fail,
//! asynchronously", resolved relative to the injector's element.

use crate::error::Result;
use crate::ports::dom::DomNode;
use crate::value_objects::{TypeDescriptor, Value};
use async_trait::async_trait;
use std::sync::Arc;

/// Produces components, services and service state for an injection scope
#[async_trait]
pub trait ServiceLocator: Send + Sync {
    /// Component instance of type `ty` visible from `scope`
    async fn component(&self, scope: Arc<dyn DomNode>, ty: &TypeDescriptor) -> Result<Value>;

    /// Service registered under `key` visible from `scope`
    async fn service(&self, scope: Arc<dyn DomNode>, key: &str) -> Result<Value>;

    /// State of the service registered under `key` visible from `scope`
    async fn service_state(&self, scope: Arc<dyn DomNode>, key: &str) -> Result<Value>;
}
