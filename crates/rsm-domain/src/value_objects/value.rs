//! Dynamically typed values
//!
//! Module exports, provider results, receivers and call results all flow
//! through the core as [`Value`]s; consumers downcast to the concrete type.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Shareable, type-erased value that remembers its concrete type name
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wrap a concrete value
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap an already shared value without re-allocating
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow as `T` if that is the concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Share as `Arc<T>` if that is the concrete type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Whether the concrete type is `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Runtime type of the wrapped value
    pub fn type_id(&self) -> TypeId {
        Any::type_id(&*self.inner)
    }

    /// Full type name of the wrapped value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether both handles point at the same allocation
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Runtime type a receiver or component must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
}

impl TypeDescriptor {
    /// Descriptor for `T`
    pub fn of<T: Any>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Full type name, including its module path
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without module path or generic arguments (`Counter` for `app::Counter<u8>`)
    pub fn short_name(&self) -> &'static str {
        let base = self
            .type_name
            .split_once('<')
            .map_or(self.type_name, |(base, _)| base);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// Whether `value` is an instance of this type
    pub fn matches(&self, value: &Value) -> bool {
        value.type_id() == self.type_id
    }
}
