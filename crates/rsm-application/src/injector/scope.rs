//! Element-anchored injection scopes
//!
//! An [`Injector`] exists for every element carrying the boundary attribute.
//! Injectors mirror the DOM: [`Injector::get_parent`] walks up to the nearest
//! boundary-marked ancestor. Injectors are cheap handles and are not memoized
//! per element; two injectors for the same element behave identically.

use crate::domain_services::key_codec::kebab_to_camel;
use crate::domain_services::symbol_resolver::SymbolResolver;
use crate::injector::injected_fn::{CallFuture, InjectedFn};
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use rsm_domain::constants::{BOUNDARY_ATTRIBUTE, KEY_SEPARATOR};
use rsm_domain::error::{Error, Result};
use rsm_domain::ports::{DomNode, ServiceLocator};
use rsm_domain::value_objects::{KeyProps, TypeDescriptor, Value};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Collaborators shared by every injector of one application root
pub struct InjectionScope {
    resolver: Arc<SymbolResolver>,
    locator: Arc<dyn ServiceLocator>,
    boundary_attribute: String,
}

impl InjectionScope {
    /// Scope using the default boundary attribute
    pub fn new(resolver: Arc<SymbolResolver>, locator: Arc<dyn ServiceLocator>) -> Self {
        Self::with_boundary_attribute(resolver, locator, BOUNDARY_ATTRIBUTE)
    }

    /// Scope using a custom boundary attribute
    pub fn with_boundary_attribute<S: Into<String>>(
        resolver: Arc<SymbolResolver>,
        locator: Arc<dyn ServiceLocator>,
        boundary_attribute: S,
    ) -> Self {
        Self {
            resolver,
            locator,
            boundary_attribute: boundary_attribute.into(),
        }
    }

    /// Attribute marking injection boundaries
    pub fn boundary_attribute(&self) -> &str {
        &self.boundary_attribute
    }
}

/// Resolution scope anchored to one boundary element
#[derive(Clone)]
pub struct Injector {
    inner: Arc<InjectorInner>,
}

struct InjectorInner {
    element: Arc<dyn DomNode>,
    element_props: RwLock<Option<KeyProps>>,
    scope: Arc<InjectionScope>,
}

impl Injector {
    /// Injector anchored to `element`
    pub fn new(element: Arc<dyn DomNode>, scope: Arc<InjectionScope>) -> Self {
        Self {
            inner: Arc::new(InjectorInner {
                element,
                element_props: RwLock::new(None),
                scope,
            }),
        }
    }

    /// Injector of the nearest boundary element, `element` itself included
    pub fn closest(element: Arc<dyn DomNode>, scope: Arc<InjectionScope>) -> Option<Self> {
        if element.has_attribute(scope.boundary_attribute()) {
            return Some(Self::new(element, scope));
        }
        element
            .closest_ancestor_with(scope.boundary_attribute())
            .map(|boundary| Self::new(boundary, scope))
    }

    /// Anchored element
    pub fn element(&self) -> Arc<dyn DomNode> {
        Arc::clone(&self.inner.element)
    }

    /// Symbol resolver of this scope
    pub fn resolver(&self) -> Arc<SymbolResolver> {
        Arc::clone(&self.inner.scope.resolver)
    }

    /// Injector of the nearest boundary-marked strict ancestor
    pub fn get_parent(&self) -> Option<Injector> {
        let scope = &self.inner.scope;
        self.inner
            .element
            .closest_ancestor_with(scope.boundary_attribute())
            .map(|parent| Injector::new(parent, Arc::clone(scope)))
    }

    /// Property bag of the element: the override if set, else derived from attributes
    ///
    /// Derived props use camelCased attribute names; reserved attributes
    /// (anything containing `:`) are skipped.
    pub fn element_props(&self) -> KeyProps {
        if let Some(props) = self
            .inner
            .element_props
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return props.clone();
        }

        let element = &self.inner.element;
        element
            .attribute_names()
            .into_iter()
            .filter(|name| !name.contains(KEY_SEPARATOR))
            .filter_map(|name| {
                let value = element.attribute(&name)?;
                Some((kebab_to_camel(&name), JsonValue::String(value)))
            })
            .collect()
    }

    /// Override the element props; `None` goes back to deriving them
    pub fn set_element_props(&self, props: Option<KeyProps>) {
        *self
            .inner
            .element_props
            .write()
            .unwrap_or_else(PoisonError::into_inner) = props;
    }

    /// Component of type `ty` visible from this scope
    pub async fn get_component(&self, ty: &TypeDescriptor) -> Result<Value> {
        self.inner.scope.locator.component(self.element(), ty).await
    }

    /// Service registered under `key` visible from this scope
    pub async fn get_service(&self, key: &str) -> Result<Value> {
        self.inner.scope.locator.service(self.element(), key).await
    }

    /// State of the service registered under `key`
    pub async fn get_service_state(&self, key: &str) -> Result<Value> {
        self.inner
            .scope
            .locator
            .service_state(self.element(), key)
            .await
    }

    /// Resolve `f`'s providers against this injector and apply it
    ///
    /// A receiver that does not match the declared receiver type fails here,
    /// before any provider is called. Otherwise every provider is started
    /// immediately. The returned future fails as soon as any provider fails,
    /// otherwise it settles once all of them have settled and the callable has
    /// run. A receiver resolved as a component must also have the declared
    /// type. Failures of injected functions carry their declaration site.
    pub fn invoke(
        &self,
        f: &InjectedFn,
        receiver: Option<Value>,
        args: Vec<Value>,
    ) -> Result<CallFuture> {
        let injection = match f {
            InjectedFn::Plain(callable) => return Ok(callable(None, args)),
            InjectedFn::Injected(injection) => injection,
        };
        let site = injection.declared_at;

        if let (Some(expected), Some(actual)) = (&injection.receiver_type, &receiver)
            && !expected.matches(actual)
        {
            return Err(
                Error::wrong_receiver_type(expected.type_name(), actual.type_name())
                    .declared(site.as_ref()),
            );
        }

        let mut tasks: Vec<BoxFuture<'static, Result<Value>>> = injection
            .providers
            .iter()
            .flatten()
            .map(|provider| provider(self.clone()))
            .collect();

        let resolve_receiver = receiver.is_none() && injection.receiver_type.is_some();
        if let (true, Some(ty)) = (resolve_receiver, injection.receiver_type) {
            let this = self.clone();
            tasks.push(async move { this.get_component(&ty).await }.boxed());
        }

        debug!(
            providers = tasks.len(),
            resolve_receiver,
            declared_at = ?site,
            "Invoking injected function"
        );

        let callable = Arc::clone(&injection.callable);
        let expected = injection.receiver_type;
        Ok(async move {
            let outcome: Result<Value> = async {
                let mut values = settle_in_order(tasks).await?;
                let receiver = if resolve_receiver {
                    let component = values.pop();
                    if let (Some(expected), Some(actual)) = (expected, &component)
                        && !expected.matches(actual)
                    {
                        return Err(Error::wrong_receiver_type(
                            expected.type_name(),
                            actual.type_name(),
                        ));
                    }
                    component
                } else {
                    receiver
                };
                values.extend(args);
                callable(receiver, values).await
            }
            .await;
            outcome.map_err(|error| error.declared(site.as_ref()))
        }
        .boxed())
    }

    /// [`invoke`](Self::invoke) and await the result
    pub async fn call(
        &self,
        f: &InjectedFn,
        receiver: Option<Value>,
        args: Vec<Value>,
    ) -> Result<Value> {
        self.invoke(f, receiver, args)?.await
    }
}

/// Drive every task concurrently; values come back in task order
///
/// The first task to fail ends the wait, dropping the rest.
async fn settle_in_order(tasks: Vec<BoxFuture<'static, Result<Value>>>) -> Result<Vec<Value>> {
    let mut slots: Vec<Option<Value>> = vec![None; tasks.len()];
    let mut running: FuturesUnordered<_> = tasks
        .into_iter()
        .enumerate()
        .map(|(index, task)| task.map(move |outcome| (index, outcome)))
        .collect();
    while let Some((index, outcome)) = running.next().await {
        slots[index] = Some(outcome?);
    }
    Ok(slots.into_iter().flatten().collect())
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("element", &self.inner.element)
            .finish_non_exhaustive()
    }
}
