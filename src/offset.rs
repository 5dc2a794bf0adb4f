//! Explicit keys versus auto-append, and the integer-key convention.
//!
//! Both collections hand out "next" integer keys the way a growable array
//! does: one past the largest integer key ever stored, starting at 0. The
//! counter is never lowered by removals.

use crate::error::{CollectionError, Result};

/// Target of a `set` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Offset<K> {
    /// No explicit key: append under the next integer key.
    Append,
    /// Assign under this key, updating in place if it already exists.
    At(K),
}

impl<K> From<Option<K>> for Offset<K> {
    fn from(key: Option<K>) -> Self {
        match key {
            Some(key) => Offset::At(key),
            None => Offset::Append,
        }
    }
}

impl From<&str> for Offset<String> {
    fn from(key: &str) -> Self {
        Offset::At(key.to_owned())
    }
}

impl From<String> for Offset<String> {
    fn from(key: String) -> Self {
        Offset::At(key)
    }
}

impl From<&String> for Offset<String> {
    fn from(key: &String) -> Self {
        Offset::At(key.clone())
    }
}

impl From<i64> for Offset<i64> {
    fn from(index: i64) -> Self {
        Offset::At(index)
    }
}

/// Reads `key` as an integer key if it is written canonically.
///
/// Canonical means an optional `-` followed by decimal digits with no leading
/// zero (except `"0"` itself) that fits in an `i64`. `"07"`, `"+7"`, `" 7"`
/// and `"-0"` stay plain string keys.
pub fn canonical_index(key: &str) -> Option<i64> {
    let digits = key.strip_prefix('-').unwrap_or(key);
    let canonical = match digits.as_bytes() {
        [] => false,
        [b'0'] => !key.starts_with('-'),
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    };
    if canonical { key.parse().ok() } else { None }
}

/// Parses a textual offset into an integer key, failing instead of coercing.
///
/// Surrounding whitespace is ignored; anything else `i64::from_str` rejects is
/// an [`CollectionError::InvalidOffset`].
pub fn parse_index(offset: &str) -> Result<i64> {
    offset
        .trim()
        .parse()
        .map_err(|_| CollectionError::InvalidOffset(offset.to_owned()))
}

/// Tracks the next auto-append key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct NextIndex(i64);

impl NextIndex {
    #[inline]
    pub(crate) fn get(self) -> i64 {
        self.0
    }

    /// Records that `index` is now in use.
    #[inline]
    pub(crate) fn observe(&mut self, index: i64) {
        if index >= self.0 {
            self.0 = index.saturating_add(1);
        }
    }

    #[inline]
    pub(crate) fn reset(&mut self, next: i64) {
        self.0 = next;
    }
}
