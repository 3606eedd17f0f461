//! Value objects
//!
//! Immutable types passed between the core's services and its ports.

pub mod configuration;
pub mod decl_site;
pub mod key;
pub mod symbol;
pub mod value;

pub use configuration::{BaseConfiguration, Configuration, ProtocolAliases};
pub use decl_site::DeclSite;
pub use key::{KeyProps, KeySchema, KeyedType};
pub use symbol::{SymbolKey, SymbolParams};
pub use value::{TypeDescriptor, Value};
