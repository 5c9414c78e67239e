//! Open-addressing hash table with linear probing and tombstones.
//!
//! Slots live in one contiguous vector. A slot is empty (never used),
//! occupied, or a tombstone left behind by `erase` so that probe chains
//! running through it stay intact. Lookups stop at the first empty slot
//! and walk past tombstones; inserts reuse the first tombstone on their
//! probe path.
//!
//! The table grows to `2 * capacity + 1` slots once the live count
//! reaches `capacity * LOAD_FACTOR`, and never shrinks.

use core::mem;

use tracing::{debug, trace, warn};

use crate::structures::universal::UniversalHash;
use crate::traits::hash::StructuralHash;
use crate::traits::store::{Store, TableError};

/// Live-entry ratio at which the table grows before the next insert.
pub const LOAD_FACTOR: f64 = 0.6;

/// Capacity used by [`HashTable::new`] and for a requested capacity of 0.
pub const DEFAULT_CAPACITY: usize = 157;

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Empty,
    Occupied { key: K, value: V },
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// The entry, if this slot is live.
    #[inline]
    fn live(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    fn live_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

/// Hash table keyed by any [`StructuralHash`] key, such as a
/// [`Polynomial`](crate::Polynomial).
///
/// Bucket placement runs the key's structural hash through a
/// [`UniversalHash`] drawn once when the table is built.
///
/// # Example
///
/// ```
/// use polytab::{HashTable, Polynomial, TableError};
///
/// let mut table = HashTable::with_seed(16, 1);
/// let key: Polynomial = "x+y+z".parse().unwrap();
/// table.insert(key, "sum").unwrap();
///
/// // Same value written in another order finds the same entry.
/// let alias: Polynomial = "z+x+y".parse().unwrap();
/// assert_eq!(table.find(&alias), Ok(&"sum"));
/// assert_eq!(table.insert(alias, "again"), Err(TableError::DuplicateKey));
/// ```
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    hasher: UniversalHash,
}

impl<K, V> HashTable<K, V> {
    /// Create a table with [`DEFAULT_CAPACITY`] slots and entropy-seeded
    /// hash parameters.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with `capacity` slots and entropy-seeded hash
    /// parameters. A capacity of 0 falls back to [`DEFAULT_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, UniversalHash::from_entropy())
    }

    /// Create a table whose hash parameters are derived from `seed`.
    ///
    /// Tables built with the same seed and capacity place keys identically.
    /// Outside of tests, prefer [`with_capacity`](Self::with_capacity).
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_hasher(capacity, UniversalHash::seeded(seed))
    }

    /// Create a table with explicit hash parameters.
    pub fn with_hasher(capacity: usize, hasher: UniversalHash) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        Self {
            slots: empty_slots(capacity),
            len: 0,
            hasher,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of physical slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The hash parameters this table was built with.
    pub fn hash_params(&self) -> UniversalHash {
        self.hasher
    }

    /// Iterate over live entries in slot order.
    ///
    /// Each call starts a fresh pass from the first slot.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Iterate over live entries with mutable access to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    fn needs_growth(&self) -> bool {
        self.len as f64 >= self.slots.len() as f64 * LOAD_FACTOR
    }
}

impl<K: StructuralHash + PartialEq, V> HashTable<K, V> {
    /// Insert a new entry.
    ///
    /// # Errors
    ///
    /// - [`TableError::DuplicateKey`] if `key` is already live. The table
    ///   is left untouched, capacity included.
    /// - [`TableError::TableFull`] if the probe found neither an empty
    ///   slot nor a tombstone.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        if self.needs_growth() {
            if self.position(&key).is_some() {
                return Err(TableError::DuplicateKey);
            }
            self.grow();
        }

        let index = self.vacancy(&key)?;
        self.slots[index] = Slot::Occupied { key, value };
        self.len += 1;
        Ok(())
    }

    /// Look up the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if `key` is not live.
    pub fn find(&self, key: &K) -> Result<&V, TableError> {
        self.position(key)
            .and_then(|index| self.slots[index].live())
            .map(|(_, value)| value)
            .ok_or(TableError::KeyNotFound)
    }

    /// Mutable access to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if `key` is not live.
    pub fn find_mut(&mut self, key: &K) -> Result<&mut V, TableError> {
        match self.position(key) {
            Some(index) => self.slots[index]
                .live_mut()
                .map(|(_, value)| value)
                .ok_or(TableError::KeyNotFound),
            None => Err(TableError::KeyNotFound),
        }
    }

    /// Remove the entry under `key`, leaving a tombstone in its slot.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::KeyNotFound`] if `key` is not live.
    pub fn erase(&mut self, key: &K) -> Result<V, TableError> {
        let index = self.position(key).ok_or(TableError::KeyNotFound)?;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                trace!(index, len = self.len, "erased entry");
                Ok(value)
            }
            other => {
                self.slots[index] = other;
                Err(TableError::KeyNotFound)
            }
        }
    }

    /// Returns true if `key` is live.
    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    fn home(&self, key: &K) -> usize {
        self.hasher.bucket(key.structural_hash(), self.slots.len())
    }

    /// Slot index holding `key`, if live.
    ///
    /// Stops at the first empty slot; tombstones are walked past since the
    /// key may sit further along the chain.
    fn position(&self, key: &K) -> Option<usize> {
        let capacity = self.slots.len();
        let start = self.home(key);
        let mut index = start;

        loop {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied { key: k, .. } if k == key => return Some(index),
                _ => {}
            }
            index = (index + 1) % capacity;
            if index == start {
                return None;
            }
        }
    }

    /// Slot index where `key` should be stored.
    ///
    /// Prefers the first tombstone on the probe path over the empty slot
    /// that ends it.
    fn vacancy(&self, key: &K) -> Result<usize, TableError> {
        let capacity = self.slots.len();
        let start = self.home(key);
        let mut index = start;
        let mut tombstone = None;

        loop {
            match &self.slots[index] {
                Slot::Empty => break,
                Slot::Occupied { key: k, .. } if k == key => {
                    return Err(TableError::DuplicateKey);
                }
                Slot::Occupied { .. } => {}
                Slot::Tombstone => {
                    tombstone.get_or_insert(index);
                }
            }
            index = (index + 1) % capacity;
            if index == start {
                return tombstone.ok_or_else(|| {
                    warn!(capacity, len = self.len, "probe wrapped without a free slot");
                    TableError::TableFull
                });
            }
        }

        match tombstone {
            Some(reused) => {
                trace!(index = reused, "reusing tombstone");
                Ok(reused)
            }
            None => Ok(index),
        }
    }

    /// Move every live entry into a table of `2 * capacity + 1` slots.
    /// Tombstones are dropped and the hash parameters are kept.
    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity * 2 + 1;
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));

        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                let mut index = self.home(&key);
                while !matches!(self.slots[index], Slot::Empty) {
                    index = (index + 1) % new_capacity;
                }
                self.slots[index] = Slot::Occupied { key, value };
            }
        }

        debug!(old_capacity, new_capacity, len = self.len, "rehashed table");
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StructuralHash + PartialEq, V> Store<K, V> for HashTable<K, V> {
    fn insert(&mut self, key: K, value: V) -> Result<(), TableError> {
        HashTable::insert(self, key, value)
    }

    fn find(&self, key: &K) -> Result<&V, TableError> {
        HashTable::find(self, key)
    }

    fn find_mut(&mut self, key: &K) -> Result<&mut V, TableError> {
        HashTable::find_mut(self, key)
    }

    fn erase(&mut self, key: &K) -> Result<V, TableError> {
        HashTable::erase(self, key)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn contains_key(&self, key: &K) -> bool {
        HashTable::contains_key(self, key)
    }
}

/// Iterator over the live entries of a [`HashTable`].
///
/// The borrow it holds keeps the table from being modified mid-pass.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Slot::live)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Mutable iterator over the live entries of a [`HashTable`].
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Slot::live_mut)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut HashTable<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
