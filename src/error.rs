//! Error type shared by both cursor collections.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Errors surfaced by [`OrderedMap`](crate::OrderedMap) and
/// [`OrderedSequence`](crate::OrderedSequence).
///
/// Forgiving lookups (`get`, `contains_key`, `remove`) never produce an error;
/// only cursor protocol violations and boundary conversions do.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// `current` or `current_key` was called while the cursor is not valid.
    #[error("cursor position {position} is out of range for length {len}")]
    IndexOutOfRange {
        /// Cursor position at the time of the call.
        position: usize,
        /// Collection length at the time of the call.
        len: usize,
    },

    /// `remove_first` was called on an empty collection.
    #[error("collection is empty")]
    EmptyCollection,

    /// A textual offset could not be read as an integer index.
    #[error("invalid integer offset: {0:?}")]
    InvalidOffset(String),

    /// JSON encoding or decoding failed.
    #[cfg(feature = "serde")]
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PartialEq for CollectionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::IndexOutOfRange { position: p1, len: l1 },
                Self::IndexOutOfRange { position: p2, len: l2 },
            ) => p1 == p2 && l1 == l2,
            (Self::EmptyCollection, Self::EmptyCollection) => true,
            (Self::InvalidOffset(a), Self::InvalidOffset(b)) => a == b,
            // serde_json::Error carries no equality; two encode failures never compare equal.
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_index_out_of_range() {
        let err = CollectionError::IndexOutOfRange { position: 3, len: 3 };
        assert_eq!(err.to_string(), "cursor position 3 is out of range for length 3");
    }

    #[test]
    fn test_error_display_empty_and_offset() {
        assert_eq!(CollectionError::EmptyCollection.to_string(), "collection is empty");
        assert_eq!(
            CollectionError::InvalidOffset("x1".into()).to_string(),
            "invalid integer offset: \"x1\""
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CollectionError::EmptyCollection, CollectionError::EmptyCollection);
        assert_ne!(
            CollectionError::EmptyCollection,
            CollectionError::IndexOutOfRange { position: 0, len: 0 }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CollectionError = json_err.into();
        assert!(err.to_string().starts_with("serialization: "));
    }
}
