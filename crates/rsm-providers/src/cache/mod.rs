//! Symbol cache implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`MemorySymbolCache`] | Sharded concurrent map, one per resolver |

pub mod memory;

pub use memory::MemorySymbolCache;
