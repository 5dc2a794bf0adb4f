//! # Cursor Collections
//!
//! Two insertion-ordered collection primitives meant to be specialised into
//! concrete typed collections:
//!
//! * [`OrderedMap<V>`] — `String` keys, JSON-object shaped.
//! * [`OrderedSequence<V>`] — `i64` keys with array-like append and prepend,
//!   JSON-array shaped.
//!
//! ## Key Features
//!
//! * **Stable order:** new keys go to the end, updates keep their position,
//!   removals keep the relative order of the survivors.
//! * **Built-in cursor:** each collection carries a forward-only cursor driven by
//!   `rewind` / `is_valid` / `current` / `advance`, shared through the
//!   [`CursorCollection`] trait.
//! * **Forgiving lookups:** `get`, `contains_key` and `remove` never fail; only
//!   cursor misuse ([`CollectionError::IndexOutOfRange`]) and
//!   `remove_first` on an empty collection ([`CollectionError::EmptyCollection`])
//!   are errors.
//! * **Performance:** the backing store is an `ordermap::OrderMap` hashed with
//!   `FnvBuildHasher`, which is fast for the short keys these collections hold.
//!
//! ## Cargo features
//!
//! * `serde` *(default)*: `Serialize` / `Deserialize` for both collections plus
//!   `to_json_value`, `to_json_string` and `from_json_str` helpers.
//!
//! ## Examples
//!
//! ### OrderedMap
//!
//! ```rust
//! use cursor_collections::OrderedMap;
//!
//! let mut map = OrderedMap::from_entries([("a", 1), ("b", 2)]);
//! map.set("c", 3);
//! map.remove("a");
//!
//! assert_eq!(map.keys(), ["b", "c"]);
//! assert_eq!(map.get("a"), None);
//! ```
//!
//! ### OrderedSequence
//!
//! ```rust
//! use cursor_collections::OrderedSequence;
//!
//! let mut seq = OrderedSequence::from(vec![10, 20, 30]);
//! assert_eq!(seq.remove_first(), Ok(10));
//! seq.push(40);
//!
//! assert_eq!(seq.snapshot(), [20, 30, 40]);
//! assert_eq!(seq.keys(), [1, 2, 3]);
//! ```
//!
//! ### Concrete collections
//!
//! A typed collection fixes the element type, and can validate before storing:
//!
//! ```rust
//! use cursor_collections::OrderedMap;
//!
//! pub type Headers = OrderedMap<String>;
//!
//! #[derive(Default)]
//! pub struct Ports(OrderedMap<u16>);
//!
//! impl Ports {
//!     pub fn bind(&mut self, name: &str, port: u16) -> Option<String> {
//!         (port != 0).then(|| self.0.set(name, port))
//!     }
//! }
//!
//! let mut ports = Ports::default();
//! assert!(ports.bind("http", 80).is_some());
//! assert!(ports.bind("bad", 0).is_none());
//! ```

// --- Module Declarations ---

pub mod cursor;
pub mod error;
pub mod maps;
pub mod nullable;
pub mod offset;
pub mod vecs;

// --- Re-exports ---

pub use cursor::{CursorCollection, CursorState};
pub use error::{CollectionError, Result};
pub use maps::ordered_map::OrderedMap;
pub use nullable::Nullable;
pub use offset::{Offset, canonical_index, parse_index};
pub use vecs::ordered_sequence::{IntoValues, OrderedSequence};

/// Backing store shared by both collections.
pub type Entries<K, V> = ordermap::OrderMap<K, V, fnv::FnvBuildHasher>;
