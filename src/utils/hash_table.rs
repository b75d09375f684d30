use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::hash::Hash;

/// Keyed map that answers lookups for missing keys with a default value
///
/// Typically used to cache Hilbert keys or coordinates by some application
/// identifier. [`find()`](Self::find) never fails: a miss returns the
/// table's default value instead.
#[derive(Debug, Clone)]
pub struct HashTable<K, V> {
    entries: FxHashMap<K, V>,
    default_value: V,
}

impl<K: Hash + Eq, V: Default> HashTable<K, V> {
    /// Create an empty table answering misses with `V::default()`
    pub fn new() -> Self {
        Self::with_default(V::default())
    }

    /// Create an empty table with room for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            default_value: V::default(),
        }
    }
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Create an empty table answering misses with `default_value`
    pub fn with_default(default_value: V) -> Self {
        Self {
            entries: FxHashMap::default(),
            default_value,
        }
    }

    /// Insert `value` unless `key` is already present
    ///
    /// An existing entry is never overwritten. Returns `true` if the value
    /// was inserted.
    pub fn add(&mut self, key: K, value: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    /// Look up `key`, falling back to the default value on a miss
    pub fn find<Q>(&self, key: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).unwrap_or(&self.default_value)
    }

    /// `true` if `key` has an entry
    pub fn holds<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// The value returned for missing keys
    pub fn default_value(&self) -> &V {
        &self.default_value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }
}

impl<K: Hash + Eq, V: Default> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for HashTable<K, V> {
    /// Adds every pair with [`add()`](Self::add) semantics: the first value
    /// for a key wins
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Hash + Eq, V: Default> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
