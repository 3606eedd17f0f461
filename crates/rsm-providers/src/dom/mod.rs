//! DOM tree implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`MemoryDocument`], [`MemoryElement`] | In-memory tree for server-side hosts and tests |

pub mod memory;

pub use memory::{MemoryDocument, MemoryElement};
