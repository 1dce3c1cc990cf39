//! One-to-many associative container.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Keys;
use std::hash::Hash;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

/// A map where zero or more values are associated with each key.
///
/// Values under a key keep their insertion order. A key is present if and only if
/// at least one value is stored under it: removing the last value of a key removes
/// the key as well.
#[derive(Debug, Clone)]
pub struct Multimap<K, V> {
    /// Key to its (never empty) value sequence.
    entries: HashMap<K, Vec<V>>,
}

impl<K, V> Default for Multimap<K, V> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<K, V> Multimap<K, V> {
    /// Creates an empty multimap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of key-value pairs.
    ///
    /// This is not the number of distinct keys, which is `keys().len()`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Distinct keys currently holding at least one value.
    pub fn keys(&self) -> Keys<'_, K, Vec<V>> {
        self.entries.keys()
    }

    /// Every stored value, key by key, in insertion order within each key.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values().flatten()
    }

    /// Every key-value pair, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().flat_map(|(key, values)| values.iter().map(move |value| (key, value)))
    }

    /// Read-only view of the map from each key to its values.
    #[must_use]
    pub const fn as_map(&self) -> &HashMap<K, Vec<V>> {
        &self.entries
    }
}

impl<K: Eq + Hash, V> Multimap<K, V> {
    /// Appends `value` to the values of `key`.
    pub fn put(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().push(value);
    }

    /// Makes `value` the only value associated with `key`.
    pub fn put_only(&mut self, key: K, value: V) {
        self.entries.insert(key, vec![value]);
    }

    /// Appends every item of `values` to `key`.
    ///
    /// Returns `false` and leaves the map untouched when `values` is empty.
    pub fn put_all<I>(&mut self, key: K, values: I) -> bool
    where
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return false;
        }
        self.entries.entry(key).or_default().extend(values);
        true
    }

    /// Removes `key` and returns the values it held (empty if it was absent).
    pub fn remove_all<Q>(&mut self, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).unwrap_or_default()
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).and_then(|values| values.first())
    }

    /// Returns the values of `key` in insertion order, or an empty slice.
    #[must_use]
    pub fn get_all<Q>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }
}

impl<K: Eq + Hash, V: PartialEq> Multimap<K, V> {
    /// Stores the pair unless it is already present.
    ///
    /// Returns `true` if the pair was added.
    pub fn put_if_absent(&mut self, key: K, value: V) -> bool {
        let values = self.entries.entry(key).or_default();
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Removes the first occurrence of `value` under `key`.
    ///
    /// The key itself is dropped once it has no values left. Returns `true` if
    /// the map changed.
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(values) = self.entries.get_mut(key) else {
            return false;
        };
        let Some(index) = values.iter().position(|stored| stored == value) else {
            return false;
        };
        values.remove(index);
        if values.is_empty() {
            self.entries.remove(key);
        }
        true
    }

    /// Checks whether any key holds `value`.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.entries.values().any(|values| values.contains(value))
    }

    #[must_use]
    pub fn contains_entry<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).is_some_and(|values| values.contains(value))
    }
}

impl<K: Eq + Hash, T> Multimap<K, Option<T>> {
    /// Returns the first `Some` value stored under `key`.
    #[must_use]
    pub fn get_non_null<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_all(key).iter().find_map(Option::as_ref)
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for Multimap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, V: Eq> Eq for Multimap<K, V> {}

/// Keys mapped to an empty sequence are dropped.
impl<K: Eq + Hash, V> From<HashMap<K, Vec<V>>> for Multimap<K, V> {
    fn from(mut entries: HashMap<K, Vec<V>>) -> Self {
        entries.retain(|_, values| !values.is_empty());
        Self { entries }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Multimap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for Multimap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Serialized as a sequence of `[key, [values...]]` pairs, so keys that are not
/// strings (such as `Option<String>`) survive formats like JSON.
impl<K: Serialize, V: Serialize> Serialize for Multimap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter().map(|(key, values)| (key, values.as_slice())))
    }
}

impl<'de, K, V> Deserialize<'de> for Multimap<K, V>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(K, Vec<V>)>::deserialize(deserializer)?;
        let mut map = Self::new();
        for (key, values) in pairs {
            map.put_all(key, values);
        }
        Ok(map)
    }
}
