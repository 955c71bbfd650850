use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::ops::Index;

use hashbrown::{DefaultHashBuilder, HashTable};

use crate::array::OArray;
use crate::buffer::DEFAULT_CAPACITY;
use crate::error::{or_panic, ContainerError};
use crate::iter::{Iter, Pairs};

/// Re-hashes an index stamp from the stored hash codes.
fn stored_hash(hash_codes: &OArray<u64>, base: usize) -> impl Fn(&usize) -> u64 + '_ {
    move |&stamp| {
        hash_codes
            .get(stamp - base)
            .copied()
            .unwrap_or_default()
    }
}

/// An insertion-ordered map over three position-aligned arrays.
///
/// Position `i` holds `hash_codes[i]`, `keys[i]` and `values[i]`. Positions
/// are first-insertion order; updating a value never moves its key.
///
/// The hash index stores `base + position` for every entry. Removing the
/// first entry only bumps `base`, which keeps `remove_first` O(1); an interior
/// removal renumbers the later entries.
pub struct OrderedMap<K, V, S = DefaultHashBuilder> {
    hash_codes: OArray<u64>,
    keys: OArray<K>,
    values: OArray<V>,
    index: HashTable<usize>,
    base: usize,
    hash_builder: S,
}

impl<K, V> OrderedMap<K, V, DefaultHashBuilder> {
    /// Creates an empty `OrderedMap` with the default capacity (10).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            hash_codes: OArray::with_capacity(capacity),
            keys: OArray::with_capacity(capacity),
            values: OArray::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
            base: 0,
            hash_builder,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Capacity of the position-aligned arrays.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.keys.capacity()
    }

    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the pair at `position` in insertion order.
    #[must_use]
    pub fn get_index(&self, position: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(position)?, self.values.get(position)?))
    }

    /// Keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Iter<'_, K> {
        self.keys.iter()
    }

    /// Values in insertion order.
    #[must_use]
    pub fn values(&self) -> Iter<'_, V> {
        self.values.iter()
    }

    /// Returns an iterator over `(key, value)` pairs in insertion order.
    #[must_use]
    pub fn iter(&self) -> Pairs<'_, K, V> {
        Pairs::new(self.keys.iter(), self.values.iter())
    }

    fn matches<Q>(&self, stamp: usize, hash: u64, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let position = stamp.wrapping_sub(self.base);
        self.hash_codes.get(position) == Some(&hash)
            && self.keys.get(position).is_some_and(|stored| stored.borrow() == key)
    }

    fn find<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let stamp = self.index.find(hash, |&stamp| self.matches(stamp, hash, key))?;
        Some(stamp - self.base)
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the position of `key` in insertion order.
    pub fn position_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.is_empty() {
            return None;
        }
        self.find(self.hash_builder.hash_one(key), key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.values.get(self.position_of(key)?)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.position_of(key).is_some()
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.position_of(key)?;
        self.values.get_mut(position)
    }

    /// Inserts `value` for `key`.
    ///
    /// An existing key keeps its position and gets its value replaced; the
    /// previous value is returned. A new key is appended at the end and
    /// `None` is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        if let Some(position) = self.find(hash, &key) {
            return self
                .values
                .get_mut(position)
                .map(|slot| mem::replace(slot, value));
        }
        self.push_entry(hash, key, value);
        None
    }

    fn push_entry(&mut self, hash: u64, key: K, value: V) {
        let stamp = self.base + self.len();
        self.hash_codes.append(hash);
        self.keys.append(key);
        self.values.append(value);

        self.index
            .insert_unique(hash, stamp, stored_hash(&self.hash_codes, self.base));
    }

    /// Writes `(key, value)` at `position`, appending when `position == len()`.
    ///
    /// Returns the pair that was replaced, or `None` for an append.
    ///
    /// # Panics
    ///
    /// Panics if `position > len()` or `key` is stored at another position.
    pub fn set_index(&mut self, position: usize, key: K, value: V) -> Option<(K, V)> {
        or_panic(self.try_set_index(position, key, value))
    }

    /// Tries to write `(key, value)` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::IndexOutOfRange` if `position > len()`, or
    /// `ContainerError::DuplicateKey` if `key` is stored at another position.
    pub fn try_set_index(
        &mut self,
        position: usize,
        key: K,
        value: V,
    ) -> Result<Option<(K, V)>, ContainerError> {
        let count = self.len();
        if position > count {
            return Err(ContainerError::IndexOutOfRange {
                index: position,
                count,
            });
        }
        let hash = self.hash_builder.hash_one(&key);
        match self.find(hash, &key) {
            Some(existing) if existing != position => {
                return Err(ContainerError::DuplicateKey { position: existing });
            }
            _ => {}
        }
        if position == count {
            self.push_entry(hash, key, value);
            return Ok(None);
        }

        let stamp = self.base + position;
        let previous_hash = self.hash_codes[position];
        if let Ok(entry) = self
            .index
            .find_entry(previous_hash, |&candidate| candidate == stamp)
        {
            entry.remove();
        }

        self.hash_codes[position] = hash;
        let previous_key = mem::replace(&mut self.keys[position], key);
        let previous_value = mem::replace(&mut self.values[position], value);
        self.index
            .insert_unique(hash, stamp, stored_hash(&self.hash_codes, self.base));
        Ok(Some((previous_key, previous_value)))
    }

    /// Inserts `Some(value)` for `key`, or removes `key` when given `None`.
    ///
    /// Returns the previous value, if any.
    pub fn set(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.position_of(key)?;
        self.try_remove_at(position).ok().map(|(_, value)| value)
    }

    /// Removes and returns the pair at `position`; later pairs shift down.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty or `position >= len()`.
    pub fn remove_at(&mut self, position: usize) -> (K, V) {
        or_panic(self.try_remove_at(position))
    }

    /// Tries to remove and return the pair at `position`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::EmptyCollection` if the map is empty, or
    /// `ContainerError::IndexOutOfRange` if `position >= len()`.
    pub fn try_remove_at(&mut self, position: usize) -> Result<(K, V), ContainerError> {
        let count = self.len();
        if count == 0 {
            return Err(ContainerError::EmptyCollection);
        }
        let hash = *self
            .hash_codes
            .get(position)
            .ok_or(ContainerError::IndexOutOfRange {
                index: position,
                count,
            })?;

        let stamp = self.base + position;
        if let Ok(entry) = self.index.find_entry(hash, |&candidate| candidate == stamp) {
            entry.remove();
        }

        self.hash_codes.remove_at(position);
        let key = self.keys.remove_at(position);
        let value = self.values.remove_at(position);

        if self.is_empty() {
            self.base = 0;
        } else if position == 0 {
            self.base += 1;
        } else if position < count - 1 {
            for candidate in self.index.iter_mut() {
                if *candidate > stamp {
                    *candidate -= 1;
                }
            }
        }
        Ok((key, value))
    }

    /// Removes and returns the first pair in O(1).
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    pub fn remove_first(&mut self) -> (K, V) {
        or_panic(self.try_remove_at(0))
    }

    /// Removes and returns the last pair in O(1).
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    pub fn remove_last(&mut self) -> (K, V) {
        let last = self.len().saturating_sub(1);
        or_panic(self.try_remove_at(last))
    }

    /// Removes the first pair, or returns `None` if the map is empty.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.try_remove_at(0).ok()
    }

    /// Removes the last pair, or returns `None` if the map is empty.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.len().checked_sub(1)?;
        self.try_remove_at(last).ok()
    }

    /// Removes all pairs.
    ///
    /// With `keep_capacity == false` the arrays shrink back to their minimum
    /// capacity.
    pub fn remove_all(&mut self, keep_capacity: bool) {
        self.hash_codes.remove_all(keep_capacity);
        self.keys.remove_all(keep_capacity);
        self.values.remove_all(keep_capacity);
        self.index.clear();
        if !keep_capacity {
            self.index.shrink_to(self.keys.capacity(), |_| 0);
        }
        self.base = 0;
    }

    /// Sets the minimum capacity and grows all arrays to it if needed.
    pub fn reserve_capacity(&mut self, minimum_capacity: usize) {
        self.hash_codes.reserve_capacity(minimum_capacity);
        self.keys.reserve_capacity(minimum_capacity);
        self.values.reserve_capacity(minimum_capacity);

        let additional = minimum_capacity.saturating_sub(self.index.len());
        self.index
            .reserve(additional, stored_hash(&self.hash_codes, self.base));
    }
}

impl<K, V> Default for OrderedMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S: Clone> Clone for OrderedMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            hash_codes: self.hash_codes.clone(),
            keys: self.keys.clone(),
            values: self.values.clone(),
            index: self.index.clone(),
            base: self.base,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Builds a map with capacity for exactly the literal's pairs.
    ///
    /// A repeated key keeps its first position and its last value.
    fn from(pairs: [(K, V); N]) -> Self {
        let mut map = Self::with_capacity(N);
        map.extend(pairs);
        map
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, Q, V, S> Index<&Q> for OrderedMap<K, V, S>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &Q) -> &V {
        or_panic(self.get(key).ok_or(ContainerError::MissingKey))
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Pairs<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two maps are equal when they hold the same pairs in the same order.
impl<K, V, S1, S2> PartialEq<OrderedMap<K, V, S2>> for OrderedMap<K, V, S1>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &OrderedMap<K, V, S2>) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

impl<K: Eq, V: Eq, S> Eq for OrderedMap<K, V, S> {}

/// Renders as `[k1: v1, k2: v2, ...]`.
impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("]")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
