//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the resumable core.
//!
//! ## Module Categories
//!
//! ### Configuration & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`di`] | Composition root wiring registry, resolver and injector scope |
//! | [`constants`] | Configuration and logging constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, ConfigLoader};
pub use di::AppContext;
pub use error_ext::ErrorContext;
