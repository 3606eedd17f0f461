//! Composition root

pub mod bootstrap;

pub use bootstrap::AppContext;
