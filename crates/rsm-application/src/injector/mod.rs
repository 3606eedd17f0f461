//! Hierarchical dependency injection
//!
//! ```text
//! InjectedFn ──invoke──▶ Injector (anchored to a boundary element)
//!                           │ runs every Provider against itself
//!                           │ (providers may use the SymbolResolver,
//!                           │  the ServiceLocator or a parent Injector)
//!                           ▼
//!                 args in declaration order ++ extra args
//!                           ▼
//!                       callable(receiver, args)
//! ```

pub mod injected_fn;
pub mod providers;
pub mod scope;

pub use injected_fn::{CallFuture, Callable, InjectedFn, Injection, InjectionBuilder, Provider, provider};
pub use providers::{
    provide_component, provide_element_props, provide_parent, provide_service,
    provide_service_state, provide_symbol, provide_value,
};
pub use scope::{InjectionScope, Injector};
