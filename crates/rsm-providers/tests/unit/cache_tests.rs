//! Memory Symbol Cache Tests

use futures::FutureExt;
use futures::future;
use rsm_domain::ports::{CacheEntry, SharedLoad, SymbolCache};
use rsm_domain::value_objects::{SymbolKey, Value};
use rsm_providers::cache::MemorySymbolCache;

fn key(symbol: &str) -> SymbolKey {
    SymbolKey::new("https://app/widget.js", symbol)
}

fn pending(id: u64) -> CacheEntry {
    let load: SharedLoad = future::ready(Ok(Value::new(id))).boxed().shared();
    CacheEntry::Pending { id, load }
}

#[test]
fn test_set_get_delete() {
    let cache = MemorySymbolCache::new();
    assert!(cache.is_empty());

    cache.set(key("render"), CacheEntry::Settled(Value::new(1u8)));
    let entry = cache.get(&key("render")).unwrap();
    assert_eq!(entry.settled().and_then(|v| v.downcast_ref::<u8>()), Some(&1));
    assert_eq!(cache.len(), 1);

    assert!(cache.delete(&key("render")));
    assert!(!cache.delete(&key("render")));
    assert!(cache.get(&key("render")).is_none());
}

#[test]
fn test_get_or_insert_keeps_first_entry() {
    let cache = MemorySymbolCache::new();

    let first = cache.get_or_insert(key("render"), pending(1));
    let second = cache.get_or_insert(key("render"), pending(2));

    assert_eq!(first.pending_id(), Some(1));
    assert_eq!(second.pending_id(), Some(1));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_replace_pending_settles_matching_attempt() {
    let cache = MemorySymbolCache::new();
    cache.set(key("render"), pending(7));

    assert!(!cache.replace_pending(&key("render"), 6, Some(CacheEntry::Settled(Value::new(0u8)))));
    assert!(cache.replace_pending(&key("render"), 7, Some(CacheEntry::Settled(Value::new(1u8)))));

    let entry = cache.get(&key("render")).unwrap();
    assert!(entry.settled().is_some());
}

#[test]
fn test_replace_pending_never_touches_settled_entries() {
    let cache = MemorySymbolCache::new();
    cache.set(key("render"), CacheEntry::Settled(Value::new("seeded")));

    assert!(!cache.replace_pending(&key("render"), 0, None));
    assert!(cache.get(&key("render")).is_some());
}

#[test]
fn test_replace_pending_evicts_with_none() {
    let cache = MemorySymbolCache::new();
    cache.set(key("render"), pending(3));

    assert!(cache.replace_pending(&key("render"), 3, None));
    assert!(cache.is_empty());
    assert!(!cache.replace_pending(&key("render"), 3, None));
}

#[test]
fn test_keys_are_sorted() {
    let cache = MemorySymbolCache::new();
    cache.set(key("b"), CacheEntry::Settled(Value::new(())));
    cache.set(key("a"), CacheEntry::Settled(Value::new(())));

    assert_eq!(cache.keys(), vec![key("a"), key("b")]);
}
