//! The forward-only cursor protocol shared by both collections.
//!
//! Both containers keep an integer cursor into their key order and expose the
//! classic `rewind` / `is_valid` / `current` / `advance` loop:
//!
//! ```rust
//! use cursor_collections::{CursorCollection, OrderedSequence};
//!
//! let mut seq = OrderedSequence::from(vec![1, 2, 3]);
//! let mut total = 0;
//! seq.rewind();
//! while seq.is_valid() {
//!     total += *seq.current().unwrap();
//!     seq.advance();
//! }
//! assert_eq!(total, 6);
//! ```

use crate::error::Result;

/// Where a cursor stands relative to the collection it walks.
///
/// Structural mutations never move the cursor themselves (except
/// `remove_first` and `prepend_many`), but they change the length, so the
/// state a given position denotes can change underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// Position 0 of a non-empty collection; nothing has been yielded yet.
    BeforeStart,
    /// `0 < position < len`.
    InProgress,
    /// `position >= len`. `current` and `current_key` fail in this state.
    Exhausted,
}

impl CursorState {
    /// Classifies `position` against a collection of length `len`.
    #[inline]
    pub fn of(position: usize, len: usize) -> Self {
        if position >= len {
            CursorState::Exhausted
        } else if position == 0 {
            CursorState::BeforeStart
        } else {
            CursorState::InProgress
        }
    }
}

/// A trait for abstraction over the cursor-carrying collections.
///
/// [`OrderedMap`](crate::OrderedMap) and [`OrderedSequence`](crate::OrderedSequence)
/// implement this by delegating to their inherent methods, so generic code can
/// drive either one through the same loop.
pub trait CursorCollection {
    /// Key type (`String` for the map, `i64` for the sequence).
    type Key;
    /// Element type.
    type Value;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Current cursor position (an offset into the key order, not a key).
    fn position(&self) -> usize;

    /// Resets the cursor to 0.
    fn rewind(&mut self);

    /// Moves the cursor forward by one without any bounds check.
    fn advance(&mut self);

    /// Key at the cursor.
    fn current_key(&self) -> Result<&Self::Key>;

    /// Value at the cursor.
    fn current(&self) -> Result<&Self::Value>;

    /// Removes and returns the first entry in key order.
    fn remove_first(&mut self) -> Result<Self::Value>;

    /// Returns `true` if the collection contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `position() < len()`; drives loop termination.
    fn is_valid(&self) -> bool {
        self.position() < self.len()
    }

    fn cursor_state(&self) -> CursorState {
        CursorState::of(self.position(), self.len())
    }
}
