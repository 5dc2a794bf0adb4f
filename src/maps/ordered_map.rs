//! String-keyed, insertion-ordered map with a built-in iteration cursor.
//!
//! Provides [`OrderedMap`] — backed by an [`ordermap::OrderMap`] store plus a
//! separate key-order list that the cursor indexes into.  The key list is
//! recomputed from the store after every structural mutation, so it can never
//! drift from the entries.

use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::ops::Index;

use crate::Entries;
use crate::cursor::{CursorCollection, CursorState};
use crate::error::{CollectionError, Result};
use crate::nullable::Nullable;
use crate::offset::{NextIndex, Offset, canonical_index};

/// An insertion-order-preserving map from `String` keys to `V`, carrying a
/// forward-only cursor.
///
/// # Storage strategy
/// - `entries`: `OrderMap<String, V, FnvBuildHasher>`, the backing store.
/// - `keys`: the key order, rebuilt from `entries` after each mutation.
/// - `position`: the cursor, an offset into `keys`.
///
/// # Ordering rules
/// | Operation | Effect on order |
/// |-----------|-----------------|
/// | `set` on a new key | appended at the end |
/// | `set` on an existing key | updated in place, position kept |
/// | `remove` / `remove_first` | survivors keep their relative order |
///
/// # Auto-append keys
/// `set(Offset::Append, v)` stores `v` under the decimal string of one past the
/// largest canonical integer key ever stored (`"0"` for a fresh map).  Removing
/// entries never lowers that counter.
///
/// Concrete collections fix `V` with a type alias or wrap this type in a
/// newtype that validates values before forwarding to [`OrderedMap::set`].
#[derive(Clone)]
pub struct OrderedMap<V> {
    entries: Entries<String, V>,
    keys: Vec<String>,
    position: usize,
    next_index: NextIndex,
}

impl<V> OrderedMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::from(Entries::<String, V>::default())
    }

    /// Builds a map from `(key, value)` pairs, keeping their order.
    ///
    /// A repeated key keeps its first position and its last value.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        entries.into_iter().collect()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Current cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Resets the cursor to the first entry.
    #[inline]
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Moves the cursor one step forward.  No bounds check is performed; call
    /// [`is_valid`](Self::is_valid) before reading.
    #[inline]
    pub fn advance(&mut self) {
        self.position = self.position.saturating_add(1);
    }

    /// Returns `true` while the cursor points at an entry.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.position < self.len()
    }

    #[inline]
    pub fn cursor_state(&self) -> CursorState {
        CursorState::of(self.position, self.len())
    }

    /// Key at the cursor.
    ///
    /// Fails with [`CollectionError::IndexOutOfRange`] when the cursor is not valid.
    pub fn current_key(&self) -> Result<&str> {
        self.cursor_key().map(String::as_str)
    }

    /// Value at the cursor.
    ///
    /// Fails with [`CollectionError::IndexOutOfRange`] when the cursor is not valid.
    pub fn current(&self) -> Result<&V> {
        let key = self.cursor_key()?;
        self.entries.get(key).ok_or_else(|| self.out_of_range())
    }

    /// Mutable access to the value at the cursor.
    pub fn current_mut(&mut self) -> Result<&mut V> {
        let err = self.out_of_range();
        match self.keys.get(self.position) {
            Some(key) => self.entries.get_mut(key).ok_or(err),
            None => Err(err),
        }
    }

    /// Returns `true` if `key` is present, whatever its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns `true` if `key` is present and its value is not null.
    pub fn contains_key_with_value(&self, key: &str) -> bool
    where
        V: Nullable,
    {
        self.entries.get(key).is_some_and(|value| !value.is_null())
    }

    /// Value stored under `key`; `None` is the "no value" sentinel.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Stores `value` and returns the key it was stored under.
    ///
    /// An existing key is updated in place and keeps its position; a new key
    /// goes to the end.  [`Offset::Append`] picks the next auto-append key.
    ///
    /// ```rust
    /// use cursor_collections::{OrderedMap, Offset};
    ///
    /// let mut map = OrderedMap::from_entries([("a", 1), ("5", 2)]);
    /// assert_eq!(map.set(Offset::Append, 3), "6");
    /// map.set("a", 10);
    /// assert_eq!(map.keys(), ["a", "5", "6"]);
    /// ```
    pub fn set(&mut self, offset: impl Into<Offset<String>>, value: V) -> String {
        let key = match offset.into() {
            Offset::Append => self.next_index.get().to_string(),
            Offset::At(key) => key,
        };
        self.observe_key(&key);
        self.entries.insert(key.clone(), value);
        self.sync_keys();
        key
    }

    /// Appends `value` under the next auto-append key.
    pub fn push(&mut self, value: V) -> String {
        self.set(Offset::Append, value)
    }

    /// Removes `key` if present and returns its value.  The cursor is not moved.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key)?;
        self.sync_keys();
        tracing::trace!(key, len = self.len(), "ordered map entry removed");
        Some(removed)
    }

    /// Removes and returns the first value in key order.
    ///
    /// Remaining entries keep their keys.  If the cursor sat exactly at the old
    /// length, it is pulled back by one.  Fails with
    /// [`CollectionError::EmptyCollection`] on an empty map, without mutating.
    pub fn remove_first(&mut self) -> Result<V> {
        let old_len = self.len();
        let key = self.keys.first().cloned().ok_or(CollectionError::EmptyCollection)?;
        let value = self
            .entries
            .remove(key.as_str())
            .ok_or(CollectionError::EmptyCollection)?;
        self.sync_keys();
        if self.position == old_len {
            self.position -= 1;
        }
        tracing::trace!(
            key = %key,
            position = self.position,
            len = self.len(),
            "ordered map first entry removed"
        );
        Ok(value)
    }

    /// Removes every entry and rewinds the cursor.  The auto-append counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
        self.position = 0;
    }

    /// Keys in iteration order.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// A copy of the backing key/value store, in key order.
    ///
    /// Being a copy, mutating it cannot disturb this map's key bookkeeping.
    pub fn snapshot(&self) -> Entries<String, V>
    where
        V: Clone,
    {
        self.entries.clone()
    }

    /// Consumes the map and returns its backing store.
    pub fn into_entries(self) -> Entries<String, V> {
        self.entries
    }

    /// Iterates `(key, value)` pairs in key order without touching the cursor.
    pub fn iter(&self) -> ordermap::map::Iter<'_, String, V> {
        self.entries.iter()
    }

    /// Iterates values in key order without touching the cursor.
    pub fn values(&self) -> ordermap::map::Values<'_, String, V> {
        self.entries.values()
    }

    fn cursor_key(&self) -> Result<&String> {
        self.keys.get(self.position).ok_or_else(|| self.out_of_range())
    }

    fn out_of_range(&self) -> CollectionError {
        CollectionError::IndexOutOfRange {
            position: self.position,
            len: self.len(),
        }
    }

    fn observe_key(&mut self, key: &str) {
        if let Some(index) = canonical_index(key) {
            self.next_index.observe(index);
        }
    }

    fn sync_keys(&mut self) {
        self.keys.clear();
        self.keys.extend(self.entries.keys().cloned());
    }
}

impl<V> CursorCollection for OrderedMap<V> {
    type Key = String;
    type Value = V;

    fn len(&self) -> usize {
        self.len()
    }
    fn position(&self) -> usize {
        self.position
    }
    fn rewind(&mut self) {
        self.rewind();
    }
    fn advance(&mut self) {
        self.advance();
    }
    fn current_key(&self) -> Result<&String> {
        self.cursor_key()
    }
    fn current(&self) -> Result<&V> {
        self.current()
    }
    fn remove_first(&mut self) -> Result<V> {
        self.remove_first()
    }
}

// --- Construction ---

/// Takes ownership of `entries`; the caller keeps no alias to the store.
impl<V> From<Entries<String, V>> for OrderedMap<V> {
    fn from(entries: Entries<String, V>) -> Self {
        let mut next_index = NextIndex::default();
        for index in entries.keys().filter_map(|key| canonical_index(key)) {
            next_index.observe(index);
        }
        let mut map = Self {
            entries,
            keys: Vec::new(),
            position: 0,
            next_index,
        };
        map.sync_keys();
        map
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<Entries<String, V>>()
            .into()
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for OrderedMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let key = key.into();
            self.observe_key(&key);
            self.entries.insert(key, value);
        }
        self.sync_keys();
    }
}

// --- Traits ---

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for OrderedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same entries in the same order; cursors are ignored.
impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for OrderedMap<V> {}

impl<V> Index<&str> for OrderedMap<V> {
    type Output = V;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).expect("no entry found for key")
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = ordermap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = ordermap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- JSON ---

#[cfg(feature = "serde")]
mod json {
    use serde::de::{Deserialize, DeserializeOwned, Deserializer};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    use super::OrderedMap;
    use crate::Entries;

    /// Encodes as a JSON object whose members follow the key order.
    impl<V: Serialize> Serialize for OrderedMap<V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }

    impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Entries::<String, V>::deserialize(deserializer).map(OrderedMap::from)
        }
    }

    impl<V: Serialize> OrderedMap<V> {
        /// The map as a JSON object value.
        pub fn to_json_value(&self) -> crate::Result<serde_json::Value> {
            Ok(serde_json::to_value(self)?)
        }

        pub fn to_json_string(&self) -> crate::Result<String> {
            Ok(serde_json::to_string(self)?)
        }
    }

    impl<V: DeserializeOwned> OrderedMap<V> {
        /// Builds a map from a JSON object, keeping member order.
        pub fn from_json_str(json: &str) -> crate::Result<Self> {
            Ok(serde_json::from_str(json)?)
        }
    }
}
