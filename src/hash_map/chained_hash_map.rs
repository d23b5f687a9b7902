//! ChainedHashMap - Fixed-capacity hash map with separate chaining
//!
//! This implementation keeps a bucket array whose length is fixed at
//! construction time and resolves collisions by chaining:
//! - One indexing function maps every key to a bucket position
//! - Each bucket is an insertion-ordered chain searched linearly
//! - No rehashing: entries never move between buckets after insertion
//! - Derived views are eager snapshots, never backed by the table

use crate::error::{check_table_size, Result};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::mem;

/// Default number of buckets, a prime to reduce clustering under modulo
/// indexing.
pub const DEFAULT_TABLE_SIZE: usize = 11;

/// Fixed-capacity hash map using separate chaining
///
/// ChainedHashMap trades growth for predictability: the bucket array is sized
/// once and never reallocated, so insertion never invalidates the position of
/// an existing entry and memory use of the table itself is constant. Load is
/// absorbed entirely by the chains; every keyed operation costs O(1 + chain
/// length at the resolved bucket), degrading to O(n) only when all keys
/// collide.
///
/// Key equality drives lookup, so `K`'s `Hash` implementation must be
/// consistent with its `Eq` implementation (equal keys hash equally). That is
/// a precondition, not something the map detects.
///
/// # Type Parameters
/// - `K`: Key type (must implement Hash + Eq for keyed operations)
/// - `V`: Value type
/// - `S`: Hash builder (defaults to `ahash::RandomState`)
///
/// # Examples
///
/// ```rust
/// use chainmap::ChainedHashMap;
///
/// let mut map = ChainedHashMap::new();
/// assert_eq!(map.insert("one", 1), None);
/// assert_eq!(map.insert("one", 10), Some(1));
///
/// assert_eq!(map.get("one"), Some(&10));
/// assert_eq!(map.remove("one"), Some(10));
/// assert!(map.is_empty());
/// ```
pub struct ChainedHashMap<K, V, S = ahash::RandomState> {
    /// Bucket array; length is fixed for the lifetime of the map
    buckets: Vec<Vec<Entry<K, V>>>,
    /// Hash builder used by the indexing function
    hash_builder: S,
    /// Cached entry count; always equals the sum of chain lengths
    len: usize,
}

/// Entry in a bucket chain
#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> ChainedHashMap<K, V, ahash::RandomState> {
    /// Creates a new map with the default table size and default hasher
    pub fn new() -> Self {
        Self::with_hasher(ahash::RandomState::new())
    }

    /// Creates a new map with the given number of buckets
    ///
    /// Returns a configuration error if `table_size` is zero; a zero-slot
    /// table has no valid bucket index.
    pub fn with_table_size(table_size: usize) -> Result<Self> {
        Self::with_table_size_and_hasher(table_size, ahash::RandomState::new())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    S: BuildHasher,
{
    /// Creates a new map with the default table size and a custom hasher
    pub fn with_hasher(hash_builder: S) -> Self {
        // DEFAULT_TABLE_SIZE is nonzero, so this cannot fail
        Self::with_table_size_and_hasher(DEFAULT_TABLE_SIZE, hash_builder)
            .expect("default table size is nonzero")
    }

    /// Creates a new map with a custom table size and hasher
    ///
    /// All other constructors delegate here. Returns a configuration error
    /// if `table_size` is zero.
    pub fn with_table_size_and_hasher(table_size: usize, hash_builder: S) -> Result<Self> {
        check_table_size(table_size)?;

        let mut buckets = Vec::with_capacity(table_size);
        buckets.resize_with(table_size, Vec::new);

        Ok(ChainedHashMap {
            buckets,
            hash_builder,
            len: 0,
        })
    }

    /// Maps a key to its bucket position
    ///
    /// `Hasher::finish` yields a u64, so the plain remainder is already the
    /// mathematical modulo and always lands in `[0, table_size)`.
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Returns the number of entries in the map
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets, fixed since construction
    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current entries-per-bucket ratio
    ///
    /// There is no resize policy, so this can exceed 1.0 arbitrarily.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Removes all entries, keeping the bucket array
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator over key-value pairs, bucket order then chain order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            pos: 0,
            remaining: self.len,
        }
    }

    /// Returns an iterator over keys
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// Returns an iterator over values
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    /// Returns an owned snapshot of all keys
    ///
    /// The snapshot is not backed by the map: later mutation of the map leaves
    /// it untouched, and it holds no reference into the table. Keys are
    /// distinct by the chain invariant, so no dedup pass is needed.
    pub fn key_set(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys().cloned().collect()
    }

    /// Returns an owned snapshot of all values, one per entry
    ///
    /// Duplicates are possible when several keys map to equal values. Order is
    /// bucket order then chain order. Like [`key_set`](Self::key_set), the
    /// snapshot is independent of the map.
    pub fn value_list(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    /// Returns an owned snapshot of all key-value pairs
    ///
    /// Pairs are distinct as a set (keys are unique); iteration order is
    /// bucket order then chain order, but callers comparing entry sets should
    /// treat the result as unordered.
    pub fn entry_set(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Checks whether any entry holds a value equal to `value`
    ///
    /// Scans every chain; there is no index over values. Matching uses value
    /// equality, consistent with the key-side operations.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter())
            .any(|entry| entry.value == *value)
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Checks if the map contains a key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Gets a reference to the value for a key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Gets a mutable reference to the value for a key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// present
    ///
    /// On overwrite the existing entry keeps its key and chain position; only
    /// the value is replaced. A fresh key is appended at the end of its chain.
    /// The lookup must run before appending, or a repeated key would break the
    /// one-entry-per-key invariant.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];

        for entry in chain.iter_mut() {
            if entry.key == key {
                return Some(mem::replace(&mut entry.value, value));
            }
        }

        chain.push(Entry { key, value });
        self.len += 1;
        None
    }

    /// Removes a key, returning its value if it was present
    ///
    /// The entry is physically detached from its chain; the relative order of
    /// the remaining chain entries is preserved.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];

        let pos = chain.iter().position(|entry| entry.key.borrow() == key)?;
        let entry = chain.remove(pos);
        self.len -= 1;
        Some(entry.value)
    }
}

impl<K, V, S> Default for ChainedHashMap<K, V, S>
where
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Clone for ChainedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        ChainedHashMap {
            buckets: self.buckets.clone(),
            hash_builder: self.hash_builder.clone(),
            len: self.len,
        }
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Structural equality: two maps are equal iff their entry sets are equal,
/// regardless of table size, hasher, or bucket layout.
impl<K, V, S, S2> PartialEq<ChainedHashMap<K, V, S2>> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &ChainedHashMap<K, V, S2>) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

/// Bulk insertion: applies `insert` per pair in iteration order, so a later
/// pair with a repeated key overwrites the earlier one.
impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Iterator over key-value pairs, bucket order then chain order
pub struct Iter<'a, K, V> {
    buckets: &'a [Vec<Entry<K, V>>],
    bucket: usize,
    pos: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket < self.buckets.len() {
            let chain = &self.buckets[self.bucket];
            if self.pos < chain.len() {
                let entry = &chain[self.pos];
                self.pos += 1;
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.bucket += 1;
            self.pos = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Iterator over keys
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// Iterator over values
pub struct Values<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_lengths_sum<K, V, S>(map: &ChainedHashMap<K, V, S>) -> usize {
        map.buckets.iter().map(|chain| chain.len()).sum()
    }

    #[test]
    fn test_basic_insert_and_get() {
        let mut map = ChainedHashMap::new();

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.table_size(), DEFAULT_TABLE_SIZE);

        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("b", 2), None);
        assert_eq!(map.len(), 2);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn test_overwrite_returns_old_value() {
        let mut map = ChainedHashMap::new();

        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("a", 10), Some(1));
        assert_eq!(map.get("a"), Some(&10));
        assert_eq!(map.len(), 1);
        assert_eq!(chain_lengths_sum(&map), 1);
    }

    #[test]
    fn test_removal() {
        let mut map = ChainedHashMap::new();

        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);

        assert_eq!(map.remove("b"), Some(2));
        assert_eq!(map.remove("b"), None);
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("b"));
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("c"), Some(&3));
    }

    #[test]
    fn test_remove_preserves_chain_order() {
        // One bucket, so chain order equals insertion order
        let mut map = ChainedHashMap::with_table_size(1).unwrap();

        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);

        assert_eq!(map.remove("b"), Some(2));
        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, vec![1, 3]);
    }

    #[test]
    fn test_clear() {
        let mut map = ChainedHashMap::new();

        map.insert("a", 1);
        map.insert("b", 2);
        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.key_set().is_empty());
        assert_eq!(map.get("a"), None);
        // Buckets survive a clear
        assert_eq!(map.table_size(), DEFAULT_TABLE_SIZE);
    }

    #[test]
    fn test_contains_key_and_value() {
        let mut map = ChainedHashMap::new();

        map.insert("a", 1);
        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));

        // Value matching uses value equality, scanning every chain
        assert!(map.contains_value(&1));
        assert!(!map.contains_value(&2));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainedHashMap::new();
        map.insert("a", 1);

        if let Some(value) = map.get_mut("a") {
            *value = 10;
        }
        assert_eq!(map.get("a"), Some(&10));
    }

    #[test]
    fn test_zero_table_size_rejected() {
        let result = ChainedHashMap::<&str, i32>::with_table_size(0);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_bucket_collisions() {
        // Every key lands in bucket 0; all operations go through the chain
        let mut map = ChainedHashMap::with_table_size(1).unwrap();

        for i in 0..50 {
            assert_eq!(map.insert(i, i * 10), None);
        }
        assert_eq!(map.len(), 50);
        assert_eq!(map.load_factor(), 50.0);

        for i in 0..50 {
            assert_eq!(map.get(&i), Some(&(i * 10)));
        }

        assert_eq!(map.insert(25, 0), Some(250));
        assert_eq!(map.remove(&10), Some(100));
        assert_eq!(map.len(), 50);
        assert!(!map.contains_key(&10));
        assert!(map.contains_key(&11));
    }

    #[test]
    fn test_len_matches_chain_lengths() {
        let mut map = ChainedHashMap::with_table_size(7).unwrap();

        for i in 0..100 {
            map.insert(i, i);
        }
        map.remove(&3);
        map.remove(&99);
        map.insert(7, 70);

        assert_eq!(map.len(), 98);
        assert_eq!(chain_lengths_sum(&map), 98);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let mut map = ChainedHashMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        let keys = map.key_set();
        let values = map.value_list();
        let entries = map.entry_set();

        map.insert("c", 3);
        map.remove("a");

        assert_eq!(keys.len(), 2);
        assert_eq!(values.len(), 2);
        assert_eq!(entries.len(), 2);
        assert!(keys.contains(&"a"));
        assert!(!keys.contains(&"c"));
    }

    #[test]
    fn test_entry_set_round_trip() {
        let mut map = ChainedHashMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        map.insert("z", 3);

        let mut entries = map.entry_set();
        entries.sort();
        assert_eq!(entries, vec![("x", 1), ("y", 2), ("z", 3)]);
    }

    #[test]
    fn test_equality_ignores_table_size() {
        let mut small = ChainedHashMap::with_table_size(1).unwrap();
        let mut large = ChainedHashMap::with_table_size(97).unwrap();

        for i in 0..20 {
            small.insert(i, i * 2);
            large.insert(i, i * 2);
        }
        assert_eq!(small, large);

        large.insert(20, 40);
        assert_ne!(small, large);

        large.remove(&20);
        assert_eq!(small, large);

        large.insert(0, 999);
        assert_ne!(small, large);
    }

    #[test]
    fn test_extend_and_from_iter() {
        let pairs = vec![("a", 1), ("b", 2), ("a", 3)];
        let map: ChainedHashMap<&str, i32> = pairs.into_iter().collect();

        // Later pair wins for the repeated key
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));

        let mut other = ChainedHashMap::with_table_size(3).unwrap();
        other.insert("c", 0);
        other.extend(map.iter());
        assert_eq!(other.len(), 3);
        assert_eq!(other.get("a"), Some(&3));
        assert_eq!(other.get("b"), Some(&2));
    }

    #[test]
    fn test_iterators() {
        let mut map = ChainedHashMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);

        assert_eq!(map.iter().len(), 3);

        let mut items: Vec<_> = map.iter().collect();
        items.sort_by_key(|(k, _)| *k);
        assert_eq!(items, vec![(&"a", &1), (&"b", &2), (&"c", &3)]);

        let mut keys: Vec<_> = map.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, vec!["a", "b", "c"]);

        let mut values: Vec<_> = map.values().copied().collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3]);

        let mut via_ref: Vec<_> = (&map).into_iter().map(|(k, _)| *k).collect();
        via_ref.sort();
        assert_eq!(via_ref, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_debug_format() {
        let mut map = ChainedHashMap::new();
        map.insert("a", 1);

        let dump = format!("{:?}", map);
        assert!(dump.contains("\"a\""));
        assert!(dump.contains('1'));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut map = ChainedHashMap::new();
        map.insert("a", 1);

        let mut copy = map.clone();
        copy.insert("a", 2);
        copy.insert("b", 3);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 1);
        assert_eq!(copy.len(), 2);
    }
}
