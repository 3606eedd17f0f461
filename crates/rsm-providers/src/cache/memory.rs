//! In-memory symbol cache
//!
//! Backed by `DashMap`, so `get_or_insert` and the pending-entry checks are
//! atomic per key even on a multi-threaded runtime.

use dashmap::DashMap;
use rsm_domain::ports::{CacheEntry, SymbolCache};
use rsm_domain::value_objects::SymbolKey;

/// Concurrent in-memory symbol cache
#[derive(Debug, Default)]
pub struct MemorySymbolCache {
    entries: DashMap<SymbolKey, CacheEntry>,
}

impl MemorySymbolCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently cached, sorted
    pub fn keys(&self) -> Vec<SymbolKey> {
        let mut keys: Vec<SymbolKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl SymbolCache for MemorySymbolCache {
    fn get(&self, key: &SymbolKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: SymbolKey, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    fn delete(&self, key: &SymbolKey) -> bool {
        self.entries.remove(key).is_some()
    }

    fn get_or_insert(&self, key: SymbolKey, entry: CacheEntry) -> CacheEntry {
        self.entries.entry(key).or_insert(entry).value().clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn replace_pending(&self, key: &SymbolKey, id: u64, replacement: Option<CacheEntry>) -> bool {
        match replacement {
            Some(entry) => match self.entries.get_mut(key) {
                Some(mut slot) if slot.pending_id() == Some(id) => {
                    *slot = entry;
                    true
                }
                _ => false,
            },
            None => self
                .entries
                .remove_if(key, |_, slot| slot.pending_id() == Some(id))
                .is_some(),
        }
    }
}
