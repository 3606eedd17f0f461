//! Module loader implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`StaticModuleLoader`] | Pre-bundled modules held in memory (SSR, tests) |

pub mod static_loader;

pub use static_loader::StaticModuleLoader;
