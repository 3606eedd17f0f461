//! Ready-made providers
//!
//! Each helper returns a [`Provider`] that can be handed to
//! [`InjectionBuilder::provider`](crate::injector::InjectionBuilder::provider).

use crate::domain_services::symbol_resolver::ResolveContext;
use crate::injector::injected_fn::Provider;
use crate::injector::scope::Injector;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use rsm_domain::error::{Error, Result};
use rsm_domain::value_objects::{TypeDescriptor, Value};
use std::any::Any;
use std::sync::Arc;

/// Always provides `value`
pub fn provide_value(value: Value) -> Provider {
    Arc::new(move |_: Injector| -> BoxFuture<'static, Result<Value>> {
        future::ready(Ok(value.clone())).boxed()
    })
}

/// Provides the symbol `reference` names, resolved against the injector's element
pub fn provide_symbol<S: Into<String>>(reference: S) -> Provider {
    let reference = reference.into();
    Arc::new(move |injector: Injector| -> BoxFuture<'static, Result<Value>> {
        let element = injector.element();
        let resolution = injector
            .resolver()
            .resolve(ResolveContext::Element(element.as_ref()), &reference);
        async move { resolution?.await }.boxed()
    })
}

/// Provides the injector's element props (as a `KeyProps` value)
pub fn provide_element_props() -> Provider {
    Arc::new(|injector: Injector| -> BoxFuture<'static, Result<Value>> {
        future::ready(Ok(Value::new(injector.element_props()))).boxed()
    })
}

/// Runs `inner` against the parent injector instead of the current one
pub fn provide_parent(inner: Provider) -> Provider {
    Arc::new(move |injector: Injector| -> BoxFuture<'static, Result<Value>> {
        match injector.get_parent() {
            Some(parent) => inner(parent),
            None => future::ready(Err(Error::service(
                "parent",
                format!("{injector:?} has no parent injector"),
            )))
            .boxed(),
        }
    })
}

/// Provides the service registered under `key`
pub fn provide_service<S: Into<String>>(key: S) -> Provider {
    let key = key.into();
    Arc::new(move |injector: Injector| -> BoxFuture<'static, Result<Value>> {
        let key = key.clone();
        async move { injector.get_service(&key).await }.boxed()
    })
}

/// Provides the state of the service registered under `key`
pub fn provide_service_state<S: Into<String>>(key: S) -> Provider {
    let key = key.into();
    Arc::new(move |injector: Injector| -> BoxFuture<'static, Result<Value>> {
        let key = key.clone();
        async move { injector.get_service_state(&key).await }.boxed()
    })
}

/// Provides the component of type `T` visible from the injector
pub fn provide_component<T: Any>() -> Provider {
    let ty = TypeDescriptor::of::<T>();
    Arc::new(move |injector: Injector| -> BoxFuture<'static, Result<Value>> {
        async move { injector.get_component(&ty).await }.boxed()
    })
}
