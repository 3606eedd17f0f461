//! Domain services
//!
//! Leaf to root: the key codec and protocol registry have no collaborators;
//! the symbol resolver combines the registry with a module loader and a
//! symbol cache.

pub mod key_codec;
pub mod protocol_registry;
pub mod symbol_resolver;

pub use protocol_registry::ProtocolRegistry;
pub use symbol_resolver::{Resolution, ResolveContext, ResolverOptions, SymbolResolver};
