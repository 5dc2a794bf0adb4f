//! Integer-indexed ordered collection with array-like append and prepend.
//!
//! [`OrderedSequence`] keeps values under `i64` keys that may be sparse (gaps
//! are left behind by removals) and need not ascend (explicit keys can be set
//! in any order).  Iteration follows key insertion order, not numeric order.
//! Externally it presents as an array: snapshots and JSON carry values only.

use std::fmt::{self, Debug};
use std::iter::{FromIterator, FusedIterator};
use std::ops::Index;

use crate::Entries;
use crate::cursor::{CursorCollection, CursorState};
use crate::error::{CollectionError, Result};
use crate::nullable::Nullable;
use crate::offset::{NextIndex, Offset, parse_index};

/// An insertion-ordered sequence of `V` keyed by stable integer indices, with
/// a forward-only cursor.
///
/// # Storage strategy
/// - `entries`: `OrderMap<i64, V, FnvBuildHasher>`, the backing store.
/// - `keys`: the key order, rebuilt from `entries` after each mutation.
/// - `position`: the cursor, an offset into `keys`.
/// - `next_index`: the key the next append will use.
///
/// # Append / prepend
/// ```text
/// push(v):           entries[next_index] = v; next_index += 1
/// remove_first():    drop keys[0]; other keys unchanged
/// prepend_many(vs):  rebuild as vs ++ values, keyed 0..len; next_index = len;
///                    if position > 0 { position += vs.len() }
/// ```
///
/// # Clone
/// `Clone` copies every element, so a clone never shares element state with
/// the original.  Element types with shared ownership (`Rc`, `Arc`) keep
/// their own aliasing semantics.
#[derive(Clone)]
pub struct OrderedSequence<V> {
    entries: Entries<i64, V>,
    keys: Vec<i64>,
    position: usize,
    next_index: NextIndex,
}

impl<V> OrderedSequence<V> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::from(Entries::<i64, V>::default())
    }

    /// Builds a sequence from explicit `(index, value)` pairs, keeping their order.
    ///
    /// A repeated index keeps its first position and its last value.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, V)>,
    {
        Self::from(entries.into_iter().collect::<Entries<i64, V>>())
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the sequence contains no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Moves the cursor one step forward without a bounds check.
    #[inline]
    pub fn advance(&mut self) {
        self.position = self.position.saturating_add(1);
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.position < self.len()
    }

    #[inline]
    pub fn cursor_state(&self) -> CursorState {
        CursorState::of(self.position, self.len())
    }

    /// Index stored at the cursor.
    pub fn current_key(&self) -> Result<i64> {
        self.cursor_key().copied()
    }

    /// Value at the cursor.
    ///
    /// Fails with [`CollectionError::IndexOutOfRange`] when the cursor is not valid.
    pub fn current(&self) -> Result<&V> {
        let key = self.cursor_key()?;
        self.entries.get(key).ok_or_else(|| self.out_of_range())
    }

    pub fn current_mut(&mut self) -> Result<&mut V> {
        let err = self.out_of_range();
        match self.keys.get(self.position) {
            Some(key) => self.entries.get_mut(key).ok_or(err),
            None => Err(err),
        }
    }

    /// Returns `true` if `index` is present, whatever its value.
    pub fn contains_key(&self, index: i64) -> bool {
        self.entries.contains_key(&index)
    }

    /// Returns `true` if `index` is present and its value is not null.
    pub fn contains_key_with_value(&self, index: i64) -> bool
    where
        V: Nullable,
    {
        self.entries.get(&index).is_some_and(|value| !value.is_null())
    }

    /// Value stored under `index`; `None` is the "no value" sentinel.
    pub fn get(&self, index: i64) -> Option<&V> {
        self.entries.get(&index)
    }

    pub fn get_mut(&mut self, index: i64) -> Option<&mut V> {
        self.entries.get_mut(&index)
    }

    /// Stores `value` and returns the index it was stored under.
    ///
    /// An existing index is updated in place and keeps its position; a new
    /// index goes to the end of the iteration order even if it is numerically
    /// smaller than existing ones.
    ///
    /// ```rust
    /// use cursor_collections::{OrderedSequence, Offset};
    ///
    /// let mut seq = OrderedSequence::from(vec!["a", "b"]);
    /// assert_eq!(seq.set(Offset::Append, "c"), 2);
    /// seq.set(-1, "z");
    /// assert_eq!(seq.keys(), [0, 1, 2, -1]);
    /// ```
    pub fn set(&mut self, offset: impl Into<Offset<i64>>, value: V) -> i64 {
        let index = match offset.into() {
            Offset::Append => self.next_index.get(),
            Offset::At(index) => index,
        };
        self.next_index.observe(index);
        self.entries.insert(index, value);
        self.sync_keys();
        index
    }

    /// Like [`set`](Self::set) with an offset given as text.
    ///
    /// The text must read as an integer; it is never coerced.
    pub fn set_parsed(&mut self, offset: &str, value: V) -> Result<i64> {
        let index = parse_index(offset)?;
        Ok(self.set(index, value))
    }

    /// Appends `value` under the next free index.
    pub fn push(&mut self, value: V) -> i64 {
        self.set(Offset::Append, value)
    }

    /// Removes `index` if present and returns its value.  Other indices and
    /// the cursor are left alone.
    pub fn remove(&mut self, index: i64) -> Option<V> {
        let removed = self.entries.remove(&index)?;
        self.sync_keys();
        tracing::trace!(index, len = self.len(), "ordered sequence entry removed");
        Some(removed)
    }

    /// Removes and returns the first value in iteration order.
    ///
    /// The remaining values keep their indices.  If the cursor sat exactly at
    /// the old length it is pulled back by one.  Fails with
    /// [`CollectionError::EmptyCollection`] on an empty sequence, without mutating.
    pub fn remove_first(&mut self) -> Result<V> {
        let old_len = self.len();
        let index = *self.keys.first().ok_or(CollectionError::EmptyCollection)?;
        let value = self
            .entries
            .remove(&index)
            .ok_or(CollectionError::EmptyCollection)?;
        self.sync_keys();
        if self.position == old_len {
            self.position -= 1;
        }
        tracing::trace!(
            index,
            position = self.position,
            len = self.len(),
            "ordered sequence first entry removed"
        );
        Ok(value)
    }

    /// Inserts `values`, in order, before the current first value and returns
    /// the new length.
    ///
    /// Every value is re-keyed `0..len` in the resulting order.  When the
    /// cursor was past the start it moves forward by the number of inserted
    /// values; a cursor at 0 stays at 0 and will yield the first new value.
    ///
    /// ```rust
    /// use cursor_collections::OrderedSequence;
    ///
    /// let mut seq = OrderedSequence::from(vec!['a', 'b']);
    /// seq.advance();
    /// assert_eq!(seq.prepend_many(['x', 'y']), 4);
    /// assert_eq!(seq.position(), 3);
    /// assert_eq!(seq.snapshot(), ['x', 'y', 'a', 'b']);
    /// ```
    pub fn prepend_many<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
    {
        let mut reordered: Vec<V> = values.into_iter().collect();
        let inserted = reordered.len();
        let old = std::mem::take(&mut self.entries);
        reordered.extend(old.into_iter().map(|(_, value)| value));

        self.entries = reordered
            .into_iter()
            .enumerate()
            .map(|(index, value)| (index as i64, value))
            .collect();
        self.sync_keys();
        self.next_index.reset(self.len() as i64);
        if self.position > 0 {
            self.position += inserted;
        }
        tracing::trace!(
            inserted,
            position = self.position,
            len = self.len(),
            "ordered sequence prepended and reindexed"
        );
        self.len()
    }

    /// Removes every value and rewinds the cursor.  The append counter is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys.clear();
        self.position = 0;
    }

    /// Indices in iteration order.
    #[inline]
    pub fn keys(&self) -> &[i64] {
        &self.keys
    }

    /// The values in iteration order, without their indices.
    pub fn snapshot(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    /// Consumes the sequence and returns its values in iteration order.
    pub fn into_values(self) -> Vec<V> {
        self.into_iter().collect()
    }

    /// Iterates `(index, value)` pairs in iteration order without touching the cursor.
    pub fn iter(&self) -> ordermap::map::Iter<'_, i64, V> {
        self.entries.iter()
    }

    pub fn values(&self) -> ordermap::map::Values<'_, i64, V> {
        self.entries.values()
    }

    fn cursor_key(&self) -> Result<&i64> {
        self.keys.get(self.position).ok_or_else(|| self.out_of_range())
    }

    fn out_of_range(&self) -> CollectionError {
        CollectionError::IndexOutOfRange {
            position: self.position,
            len: self.len(),
        }
    }

    fn sync_keys(&mut self) {
        self.keys.clear();
        self.keys.extend(self.entries.keys().copied());
    }
}

impl<V> CursorCollection for OrderedSequence<V> {
    type Key = i64;
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
    fn current_key(&self) -> Result<&i64> {
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

/// Takes ownership of `entries`, keeping its key order.
impl<V> From<Entries<i64, V>> for OrderedSequence<V> {
    fn from(entries: Entries<i64, V>) -> Self {
        let mut next_index = NextIndex::default();
        for &index in entries.keys() {
            next_index.observe(index);
        }
        let mut seq = Self {
            entries,
            keys: Vec::new(),
            position: 0,
            next_index,
        };
        seq.sync_keys();
        seq
    }
}

/// Keys the values `0..len`.
impl<V> From<Vec<V>> for OrderedSequence<V> {
    fn from(values: Vec<V>) -> Self {
        values.into_iter().collect()
    }
}

impl<V> FromIterator<V> for OrderedSequence<V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        Self::from_entries(
            iter.into_iter()
                .enumerate()
                .map(|(index, value)| (index as i64, value)),
        )
    }
}

impl<V> Extend<V> for OrderedSequence<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            let index = self.next_index.get();
            self.next_index.observe(index);
            self.entries.insert(index, value);
        }
        self.sync_keys();
    }
}

// --- Traits ---

impl<V> Default for OrderedSequence<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for OrderedSequence<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same `(index, value)` pairs in the same order.
impl<V: PartialEq> PartialEq for OrderedSequence<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq> Eq for OrderedSequence<V> {}

impl<V> Index<i64> for OrderedSequence<V> {
    type Output = V;

    fn index(&self, index: i64) -> &Self::Output {
        self.get(index).expect("no entry found for key")
    }
}

/// Owning iterator over the values of an [`OrderedSequence`].
pub struct IntoValues<V> {
    inner: ordermap::map::IntoIter<i64, V>,
}

impl<V> Iterator for IntoValues<V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoValues<V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<V> ExactSizeIterator for IntoValues<V> {}

impl<V> FusedIterator for IntoValues<V> {}

impl<V> IntoIterator for OrderedSequence<V> {
    type Item = V;
    type IntoIter = IntoValues<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoValues {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a OrderedSequence<V> {
    type Item = &'a V;
    type IntoIter = ordermap::map::Values<'a, i64, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

// --- JSON ---

#[cfg(feature = "serde")]
mod json {
    use serde::de::{Deserialize, DeserializeOwned, Deserializer};
    use serde::ser::{Serialize, SerializeSeq, Serializer};

    use super::OrderedSequence;

    /// Encodes as a JSON array of the values in iteration order.
    impl<V: Serialize> Serialize for OrderedSequence<V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        }
    }

    /// Decodes a JSON array, keying the values `0..len`.
    impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedSequence<V> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Vec::<V>::deserialize(deserializer).map(OrderedSequence::from)
        }
    }

    impl<V: Serialize> OrderedSequence<V> {
        /// The sequence as a JSON array value.
        pub fn to_json_value(&self) -> crate::Result<serde_json::Value> {
            Ok(serde_json::to_value(self)?)
        }

        pub fn to_json_string(&self) -> crate::Result<String> {
            Ok(serde_json::to_string(self)?)
        }
    }

    impl<V: DeserializeOwned> OrderedSequence<V> {
        pub fn from_json_str(json: &str) -> crate::Result<Self> {
            Ok(serde_json::from_str(json)?)
        }
    }
}
