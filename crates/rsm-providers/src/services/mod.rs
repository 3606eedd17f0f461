//! Service locator implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`MemoryServiceLocator`] | Instances registered by key, components found via host attributes |

pub mod memory;

pub use memory::MemoryServiceLocator;
