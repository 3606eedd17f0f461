//! Injected functions
//!
//! Whether a callable carries injection metadata is decided once, at
//! construction: [`InjectedFn::Plain`] is applied directly, while
//! [`InjectedFn::Injected`] has its providers resolved first.
//!
//! ```
//! use rsm_application::injector::{InjectedFn, provide_value};
//! use rsm_domain::Value;
//!
//! let greet = InjectedFn::builder()
//!     .provider(provide_value(Value::new("world".to_string())))
//!     .build(|_receiver, args| async move {
//!         let name = args[0].downcast_ref::<String>().cloned().unwrap_or_default();
//!         Ok(Value::new(format!("hello {name}")))
//!     });
//! assert!(greet.decl_site().is_some());
//! ```

use crate::injector::scope::Injector;
use futures::FutureExt;
use futures::future::BoxFuture;
use rsm_domain::error::Result;
use rsm_domain::value_objects::{DeclSite, TypeDescriptor, Value};
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Asynchronous result of applying a callable
pub type CallFuture = BoxFuture<'static, Result<Value>>;

/// Target function: `(receiver, args) -> async result`
pub type Callable = Arc<dyn Fn(Option<Value>, Vec<Value>) -> CallFuture + Send + Sync>;

/// Produces one argument for an injected call, given the current injector
pub type Provider = Arc<dyn Fn(Injector) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Wrap an async closure as a [`Provider`]
pub fn provider<F, Fut>(f: F) -> Provider
where
    F: Fn(Injector) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |injector: Injector| -> BoxFuture<'static, Result<Value>> {
        f(injector).boxed()
    })
}

fn callable<F, Fut>(f: F) -> Callable
where
    F: Fn(Option<Value>, Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |receiver: Option<Value>, args: Vec<Value>| -> CallFuture {
        f(receiver, args).boxed()
    })
}

/// Callable with or without injection metadata
#[derive(Clone)]
pub enum InjectedFn {
    /// No metadata: applied directly to the extra args, without receiver
    Plain(Callable),
    /// Providers (and optionally a receiver type) resolved before applying
    Injected(Injection),
}

/// Injection metadata attached to a callable
#[derive(Clone)]
pub struct Injection {
    pub(crate) callable: Callable,
    pub(crate) providers: Vec<Option<Provider>>,
    pub(crate) receiver_type: Option<TypeDescriptor>,
    pub(crate) declared_at: Option<DeclSite>,
}

impl Injection {
    /// Declared providers; `None` entries are holes and are skipped
    pub fn providers(&self) -> &[Option<Provider>] {
        &self.providers
    }

    /// Required receiver type
    pub fn receiver_type(&self) -> Option<&TypeDescriptor> {
        self.receiver_type.as_ref()
    }
}

impl InjectedFn {
    /// Callable without injection metadata
    pub fn plain<F, Fut>(f: F) -> Self
    where
        F: Fn(Option<Value>, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self::Plain(callable(f))
    }

    /// Start declaring an injected function
    pub fn builder() -> InjectionBuilder {
        InjectionBuilder::default()
    }

    /// Injection metadata, `None` for plain callables
    pub fn injection(&self) -> Option<&Injection> {
        match self {
            Self::Plain(_) => None,
            Self::Injected(injection) => Some(injection),
        }
    }

    /// Where the function was declared, if captured
    pub fn decl_site(&self) -> Option<&DeclSite> {
        self.injection()
            .and_then(|injection| injection.declared_at.as_ref())
    }
}

impl fmt::Debug for InjectedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("InjectedFn::Plain"),
            Self::Injected(injection) => f
                .debug_struct("InjectedFn::Injected")
                .field("providers", &injection.providers.len())
                .field(
                    "receiver_type",
                    &injection.receiver_type.map(|t| t.type_name()),
                )
                .field("declared_at", &injection.declared_at)
                .finish(),
        }
    }
}

/// Builder for [`InjectedFn::Injected`]
#[derive(Default)]
pub struct InjectionBuilder {
    providers: Vec<Option<Provider>>,
    receiver_type: Option<TypeDescriptor>,
    skip_site: bool,
}

impl InjectionBuilder {
    /// Append a provider
    pub fn provider(mut self, provider: Provider) -> Self {
        self.providers.push(Some(provider));
        self
    }

    /// Append a hole (skipped at invocation)
    pub fn hole(mut self) -> Self {
        self.providers.push(None);
        self
    }

    /// Append several providers, holes included
    pub fn providers<I: IntoIterator<Item = Option<Provider>>>(mut self, providers: I) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Require the receiver to be a `T`
    pub fn receiver<T: Any>(mut self) -> Self {
        self.receiver_type = Some(TypeDescriptor::of::<T>());
        self
    }

    /// Do not record the declaration site
    pub fn without_decl_site(mut self) -> Self {
        self.skip_site = true;
        self
    }

    /// Finish the declaration; the caller's location becomes the declaration site
    #[track_caller]
    pub fn build<F, Fut>(self, f: F) -> InjectedFn
    where
        F: Fn(Option<Value>, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let declared_at = if self.skip_site {
            None
        } else {
            Some(DeclSite::capture())
        };
        InjectedFn::Injected(Injection {
            callable: callable(f),
            providers: self.providers,
            receiver_type: self.receiver_type,
            declared_at,
        })
    }
}
