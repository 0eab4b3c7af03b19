//! Insertion-ordered, key-deduplicated entry storage.

use std::collections::HashSet;

use pscache_codec::CacheEntry;
use pscache_common::Key;

/// The deduplicated entry store for one merge run.
///
/// An insertion-order-preserving mapping unique by [`Key`]: the first
/// entry seen for a key wins, later duplicates are dropped rather than
/// overwritten (within one cache version, a key's payload is assumed
/// deterministic). Output order is first-appearance order across all
/// inputs, which is what makes reruns byte-identical.
#[derive(Debug, Default)]
pub struct DedupStore {
    seen: HashSet<Key>,
    entries: Vec<CacheEntry>,
}

impl DedupStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to insert an entry.
    ///
    /// Returns `true` if the key was new and the entry was stored,
    /// `false` if an entry with the same key is already present (the new
    /// one is dropped).
    pub fn insert(&mut self, entry: CacheEntry) -> bool {
        if !self.seen.insert(entry.key.clone()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Returns `true` if an entry with this key is already stored.
    pub fn contains(&self, key: &Key) -> bool {
        self.seen.contains(key)
    }

    /// Number of unique entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.iter()
    }

    /// Consumes the store, yielding entries in insertion order.
    pub fn into_entries(self) -> Vec<CacheEntry> {
        self.entries
    }
}
