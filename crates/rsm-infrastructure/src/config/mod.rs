//! Configuration
//!
//! Layered with figment: defaults, then `rsm.toml`, then `RSM_` environment
//! variables (nested keys joined by `__`, e.g. `RSM_LOGGING__LEVEL=debug`).
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [injector]
//! boundary_attribute = "::injector"
//!
//! [[bases]]
//! base_uri = "https://app.example/"
//! protocol = { cdn = "https://cdn.example/assets" }
//! ```

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
