//! # Domain Layer
//!
//! Core types shared by every layer of Resumable Core: the error taxonomy,
//! value objects describing symbols, keys and configurations, and the ports
//! through which the core talks to its host (DOM tree, module loader, symbol
//! cache, service locator).
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`constants`] | Conventions shared with the host (separators, attributes, extensions) |
//! | [`value_objects`] | Dynamic values, symbol keys, base configurations, key schemas |
//! | [`ports`] | Traits implemented by providers and hosts |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
