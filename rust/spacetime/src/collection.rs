// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered, deduplicating storage for spatial entries.
//!
//! A [`SpatialCollection`] is the single owner of its entries. They live in
//! one backing sequence in slot order, and three addressing schemes point
//! into it:
//!
//! - **spatial key**: [`put`](SpatialCollection::put) quantizes the entry's
//!   ordinates at the collection's resolution. A new key appends; a known key
//!   overwrites its slot in place (last write wins, nothing is merged).
//! - **role**: [`put_role`](SpatialCollection::put_role) addresses a fixed
//!   slot directly, appending when the slot is the next free one.
//! - **arbitrary key**: [`put_keyed`](SpatialCollection::put_keyed) follows
//!   the same dedup-or-overwrite contract through a second, independent
//!   index keyed by a caller-supplied value.
//!
//! Role and arbitrary-key writes can leave holes (a role beyond the end
//! grows the sequence with empty slots) and can replace entries that the
//! spatial index points at. Every overwrite reindexes the affected slot, and
//! [`reindex`](SpatialCollection::reindex) drops any mapping whose slot is
//! empty, out of range or (for spatial keys) no longer holds an entry with
//! that key. Pure appends cannot invalidate a mapping and skip the reindex.

use std::hash::Hash;

use crate::error::{Error, Result};
use crate::index::DedupIndex;
use crate::key::SpatialKey;
use crate::point::{Ordinates, Spatial};

/// Ordered entries addressable by spatial key, role slot and arbitrary key.
///
/// # Example
///
/// ```
/// use spacetime::{Point, SpatialCollection};
///
/// let mut tri: SpatialCollection<Point> = SpatialCollection::default();
/// tri.put_role(0, Point::new(0.0, 0.0, 0.0));
/// tri.put_role(1, Point::new(1.0, 0.0, 0.0));
/// tri.put_role(0, Point::new(0.0, 0.0, 5.0));
///
/// assert_eq!(tri.len(), 2);
/// assert_eq!(tri.slot(0).and_then(|p| p.z()), Some(5.0));
/// ```
#[derive(Debug, Clone)]
pub struct SpatialCollection<T, K = String> {
    entries: Vec<Option<T>>,
    resolution: f64,
    spatial: DedupIndex<SpatialKey>,
    keyed: DedupIndex<K>,
}

impl<T, K: Eq + Hash> SpatialCollection<T, K> {
    /// Creates an empty collection quantizing at `resolution`.
    ///
    /// The resolution is stored by absolute value.
    pub fn new(resolution: f64) -> Self {
        Self {
            entries: Vec::new(),
            resolution: resolution.abs(),
            spatial: DedupIndex::new(),
            keyed: DedupIndex::new(),
        }
    }

    pub fn with_capacity(resolution: f64, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::new(resolution)
        }
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of occupied slots.
    pub fn count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of spatial-key mappings.
    pub fn indexed_len(&self) -> usize {
        self.spatial.len()
    }

    /// Number of arbitrary-key mappings.
    pub fn keyed_len(&self) -> usize {
        self.keyed.len()
    }

    /// Entry at `slot`, or `None` if the slot is empty or out of range.
    pub fn slot(&self, slot: usize) -> Option<&T> {
        self.entries.get(slot).and_then(Option::as_ref)
    }

    /// Appends `entry` without registering it in either index.
    ///
    /// Returns the new slot.
    pub fn push(&mut self, entry: T) -> usize {
        self.entries.push(Some(entry));
        self.entries.len() - 1
    }

    /// Occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().filter_map(Option::as_ref)
    }

    /// Every slot in order, `None` for empty ones.
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.entries.iter().map(Option::as_ref)
    }

    /// Empties the backing sequence and both indices.
    pub fn clear(&mut self) {
        self.spatial.clear();
        self.keyed.clear();
        self.entries.clear();
    }

    /// Writes `entry` into `slot`, growing with empty slots as needed.
    fn store(&mut self, slot: usize, entry: T) -> &mut T {
        if slot >= self.entries.len() {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot].insert(entry)
    }
}

impl<T: Spatial, K: Eq + Hash> SpatialCollection<T, K> {
    /// Spatial key of `ordinates` at this collection's resolution.
    pub fn key_of(&self, ordinates: &Ordinates) -> SpatialKey {
        SpatialKey::for_ordinates(ordinates, self.resolution)
    }

    /// Dedup insert by spatial key.
    ///
    /// Appends and registers `entry` if its key is new, otherwise replaces
    /// the entry already stored under that key. The replacement lands in the
    /// slot the key already maps to, so no mapping goes stale.
    pub fn put(&mut self, entry: T) -> &T {
        let key = self.key_of(&entry.ordinates());
        let slot = match self.spatial.get(&key) {
            Some(slot) => slot,
            None => {
                let slot = self.entries.len();
                self.spatial.put(key, slot);
                slot
            }
        };
        self.store(slot, entry)
    }

    /// Entry stored under the spatial key of `ordinates`.
    pub fn get(&self, ordinates: &Ordinates) -> Result<&T> {
        let key = self.key_of(ordinates);
        self.spatial
            .get(&key)
            .and_then(|slot| self.slot(slot))
            .ok_or(Error::NotFound(key))
    }

    /// Entry stored under the spatial key of `(x, y, z, t)`.
    pub fn get_at(&self, x: f64, y: f64, z: f64, t: Option<f64>) -> Result<&T> {
        self.get(&Ordinates {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            t,
        })
    }

    pub fn contains(&self, ordinates: &Ordinates) -> bool {
        self.slot_of(ordinates).is_some()
    }

    /// Slot registered under the spatial key of `ordinates`.
    pub fn slot_of(&self, ordinates: &Ordinates) -> Option<usize> {
        self.spatial.get(&self.key_of(ordinates))
    }

    /// Writes `entry` into the fixed slot `role`.
    ///
    /// Appends when the collection holds exactly `role` slots, otherwise
    /// overwrites slot `role`, first growing the sequence with empty slots
    /// if `role` lies beyond the end.
    pub fn put_role(&mut self, role: usize, entry: T) -> &T {
        if role < self.entries.len() {
            self.release_spatial(role, &entry);
        }
        self.store(role, entry)
    }

    /// Registers the entry already at `slot` under its own spatial key.
    ///
    /// Returns `false` if the slot is empty.
    pub fn index_slot(&mut self, slot: usize) -> bool {
        let Some(key) = self.slot(slot).map(|e| self.key_of(&e.ordinates())) else {
            return false;
        };
        self.spatial.put(key, slot);
        true
    }

    /// Re-quantizes at `resolution`.
    ///
    /// Slots and arbitrary-key mappings are kept. Every spatially indexed
    /// entry is registered again under its key at the new resolution; when
    /// two of them now share a cell, the later slot takes the mapping.
    pub fn set_resolution(&mut self, resolution: f64) {
        let slots = self.indexed_slots();
        self.resolution = resolution.abs();
        self.spatial.clear();
        for slot in slots {
            self.index_slot(slot);
        }
    }

    /// Slots currently reachable by spatial key, ascending.
    pub fn indexed_slots(&self) -> Vec<usize> {
        let mut slots: Vec<usize> = self.spatial.iter().map(|(_, s)| s).collect();
        slots.sort_unstable();
        slots
    }

    /// Empties `slot` and returns its entry.
    ///
    /// The slot stays in the sequence so later slot numbers do not shift.
    pub fn take_slot(&mut self, slot: usize) -> Option<T> {
        let taken = self.entries.get_mut(slot).and_then(Option::take);
        if taken.is_some() {
            self.reindex();
        }
        taken
    }

    /// Reindex for an overwrite of `slot` by `incoming`: spatial mappings to
    /// that slot survive only if they match the incoming entry's key.
    fn release_spatial(&mut self, slot: usize, incoming: &T) {
        let key = self.key_of(&incoming.ordinates());
        self.spatial.reindex(|k, s| s != slot || *k == key);
    }

    /// Drops index mappings that no longer describe the backing sequence.
    ///
    /// Returns the number of mappings dropped across both indices.
    pub fn reindex(&mut self) -> usize {
        let Self {
            entries,
            resolution,
            spatial,
            keyed,
        } = self;
        let entries: &Vec<Option<T>> = entries;

        let occupied = |slot: usize| entries.get(slot).and_then(Option::as_ref);

        let stale_spatial = spatial.reindex(|key, slot| {
            occupied(slot)
                .map(|e| SpatialKey::for_ordinates(&e.ordinates(), *resolution) == *key)
                .unwrap_or(false)
        });
        let stale_keyed = keyed.reindex(|_, slot| occupied(slot).is_some());

        stale_spatial + stale_keyed
    }
}

impl<T: Spatial, K: Eq + Hash + Clone> SpatialCollection<T, K> {
    /// Dedup insert by caller-supplied key.
    ///
    /// Appends and registers `entry` under `key` if the key is new, otherwise
    /// replaces the entry already stored under it. The spatial index is not
    /// updated for the new entry.
    pub fn put_keyed(&mut self, key: K, entry: T) -> &T {
        let slot = match self.keyed.get(&key) {
            Some(slot) => {
                self.release_spatial(slot, &entry);
                slot
            }
            None => {
                let slot = self.entries.len();
                self.keyed.put(key, slot);
                slot
            }
        };
        self.store(slot, entry)
    }

    /// Entry registered under `key`.
    pub fn get_keyed(&self, key: &K) -> Result<&T> {
        self.keyed
            .get(key)
            .and_then(|slot| self.slot(slot))
            .ok_or(Error::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.keyed.contains(key)
    }
}

impl<T, K: Eq + Hash> Default for SpatialCollection<T, K> {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<T, K: Eq + Hash> Extend<T> for SpatialCollection<T, K> {
    /// Bulk append without indexing.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(Some));
    }
}

impl<'a, T, K: Eq + Hash> IntoIterator for &'a SpatialCollection<T, K> {
    type Item = &'a T;
    type IntoIter = std::iter::FilterMap<
        std::slice::Iter<'a, Option<T>>,
        fn(&'a Option<T>) -> Option<&'a T>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .filter_map(Option::as_ref as fn(&'a Option<T>) -> Option<&'a T>)
    }
}
