//! Symbol cache port
//!
//! One cache object per resolver. Entries are either a settled value or a
//! shared in-flight load that every concurrent caller joins.

use crate::error::Result;
use crate::value_objects::{SymbolKey, Value};
use futures::future::{BoxFuture, Shared};
use std::fmt;

/// In-flight load joined by every caller asking for the same symbol
pub type SharedLoad = Shared<BoxFuture<'static, Result<Value>>>;

/// Cache slot for one symbol
#[derive(Clone)]
pub enum CacheEntry {
    /// Loaded (or seeded) value
    Settled(Value),
    /// Load in progress; `id` distinguishes successive attempts for one key
    Pending {
        /// Attempt identifier
        id: u64,
        /// Shared load future
        load: SharedLoad,
    },
}

impl CacheEntry {
    /// Attempt identifier of a pending entry
    pub fn pending_id(&self) -> Option<u64> {
        match self {
            Self::Pending { id, .. } => Some(*id),
            Self::Settled(_) => None,
        }
    }

    /// Settled value, if any
    pub fn settled(&self) -> Option<&Value> {
        match self {
            Self::Settled(value) => Some(value),
            Self::Pending { .. } => None,
        }
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settled(value) => f.debug_tuple("Settled").field(value).finish(),
            Self::Pending { id, .. } => f.debug_struct("Pending").field("id", id).finish(),
        }
    }
}

/// Symbol cache
///
/// Implementations must make `get_or_insert` atomic: two callers racing on an
/// empty slot both observe the entry that won.
pub trait SymbolCache: Send + Sync {
    /// Current entry for `key`
    fn get(&self, key: &SymbolKey) -> Option<CacheEntry>;

    /// Store `entry`, replacing whatever was there
    fn set(&self, key: SymbolKey, entry: CacheEntry);

    /// Remove the entry for `key`; returns whether one existed
    fn delete(&self, key: &SymbolKey) -> bool;

    /// Insert `entry` unless the slot is occupied; returns the occupying entry
    fn get_or_insert(&self, key: SymbolKey, entry: CacheEntry) -> CacheEntry;

    /// Number of entries
    fn len(&self) -> usize;

    /// Whether the cache holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace (or remove, with `None`) the entry only while it is still
    /// pending attempt `id`; returns whether anything changed
    fn replace_pending(&self, key: &SymbolKey, id: u64, replacement: Option<CacheEntry>) -> bool {
        if self.get(key).and_then(|entry| entry.pending_id()) != Some(id) {
            return false;
        }
        match replacement {
            Some(entry) => {
                self.set(key.clone(), entry);
                true
            }
            None => self.delete(key),
        }
    }
}
