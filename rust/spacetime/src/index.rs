// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key-to-slot index over a collection's backing sequence.
//!
//! The index never touches the entries themselves; it only records which
//! slot holds the entry registered under a key. Whenever the owner shifts or
//! overwrites slots it calls [`DedupIndex::reindex`] with a predicate that
//! says whether a mapping still describes the backing sequence.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Hash map from key to backing-sequence slot.
///
/// Cloning deep-copies the mapping, so a cloned owner can be mutated without
/// disturbing the original's slots.
#[derive(Debug, Clone)]
pub struct DedupIndex<K> {
    slots: FxHashMap<K, usize>,
}

impl<K: Eq + Hash> DedupIndex<K> {
    pub fn new() -> Self {
        Self {
            slots: FxHashMap::default(),
        }
    }

    /// Slot registered under `key`, if any.
    pub fn get(&self, key: &K) -> Option<usize> {
        self.slots.get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Registers or overwrites the mapping for `key`. Returns the previous
    /// slot.
    pub fn put(&mut self, key: K, slot: usize) -> Option<usize> {
        self.slots.insert(key, slot)
    }

    pub fn remove(&mut self, key: &K) -> Option<usize> {
        self.slots.remove(key)
    }

    /// Drops every mapping for which `keep` returns `false`.
    ///
    /// Returns the number of mappings dropped.
    pub fn reindex<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, usize) -> bool,
    {
        let before = self.slots.len();
        self.slots.retain(|key, slot| keep(key, *slot));
        before - self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Mappings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.slots.iter().map(|(k, &s)| (k, s))
    }
}

impl<K: Eq + Hash> Default for DedupIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
