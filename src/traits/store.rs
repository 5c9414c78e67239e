use thiserror::Error;

/// Errors raised by key/value stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Insert of a key that is already present.
    #[error("key already exists")]
    DuplicateKey,
    /// Lookup or removal of a key that is not present.
    #[error("key not found")]
    KeyNotFound,
    /// A probe visited every slot without finding room.
    #[error("hash table is full")]
    TableFull,
}

/// A key/value store with unique keys.
///
/// This is the contract any backend keyed by polynomials (or by names of
/// polynomials) satisfies, so they can be swapped for one another.
///
/// Laws (you should test these for concrete types):
/// - `find(k)` after a successful `insert(k, v)` yields `v`
/// - `insert(k, _)` while `k` is live fails with `DuplicateKey` and
///   leaves the store unchanged
/// - `find(k)` and `erase(k)` after `erase(k)` fail with `KeyNotFound`
pub trait Store<K, V> {
    /// Insert a new entry.
    fn insert(&mut self, key: K, value: V) -> Result<(), TableError>;

    /// Shared access to the value stored under `key`.
    fn find(&self, key: &K) -> Result<&V, TableError>;

    /// Mutable access to the value stored under `key`.
    fn find_mut(&mut self, key: &K) -> Result<&mut V, TableError>;

    /// Remove the entry under `key`, returning its value.
    fn erase(&mut self, key: &K) -> Result<V, TableError>;

    /// Number of live entries.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_ok()
    }
}
