//! Property tests for ordering, counting and cursor rules of both collections.
//!
//! Each collection is driven by random operation scripts and compared against
//! a plain `Vec<(key, value)>` model that applies the same rules by hand.

use proptest::prelude::*;

use cursor_collections::{CollectionError, Offset, OrderedMap, OrderedSequence};

// =============================================================================
// OrderedMap
// =============================================================================

#[derive(Debug, Clone)]
enum MapOp {
    Set(String, i32),
    Push(i32),
    Remove(String),
    RemoveFirst,
    Advance,
    Rewind,
}

/// Small key alphabet so that updates and removals hit existing keys often.
fn map_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-e]".prop_map(String::from),
        (0i64..6).prop_map(|i| i.to_string()),
    ]
}

fn map_op() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (map_key(), any::<i32>()).prop_map(|(k, v)| MapOp::Set(k, v)),
        1 => any::<i32>().prop_map(MapOp::Push),
        2 => map_key().prop_map(MapOp::Remove),
        1 => Just(MapOp::RemoveFirst),
        2 => Just(MapOp::Advance),
        1 => Just(MapOp::Rewind),
    ]
}

#[derive(Default)]
struct MapModel {
    entries: Vec<(String, i32)>,
    position: usize,
    next_index: i64,
}

impl MapModel {
    fn set(&mut self, key: String, value: i32) {
        if let Ok(index) = key.parse::<i64>() {
            if index.to_string() == key && index >= self.next_index {
                self.next_index = index + 1;
            }
        }
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn push(&mut self, value: i32) -> String {
        let key = self.next_index.to_string();
        self.set(key.clone(), value);
        key
    }

    fn remove(&mut self, key: &str) -> Option<i32> {
        let at = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(at).1)
    }

    fn remove_first(&mut self) -> Option<i32> {
        if self.entries.is_empty() {
            return None;
        }
        let old_len = self.entries.len();
        let (_, value) = self.entries.remove(0);
        if self.position == old_len {
            self.position -= 1;
        }
        Some(value)
    }
}

fn assert_map_matches(map: &OrderedMap<i32>, model: &MapModel) {
    let keys: Vec<&str> = model.entries.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(map.keys(), keys.as_slice());
    assert_eq!(map.len(), model.entries.len());
    assert_eq!(map.keys().len(), map.len());
    assert_eq!(map.snapshot().len(), map.len());
    assert_eq!(map.position(), model.position);
    let pairs: Vec<(String, i32)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(pairs, model.entries);
}

proptest! {
    #[test]
    fn map_follows_model(ops in prop::collection::vec(map_op(), 0..64)) {
        let mut map = OrderedMap::new();
        let mut model = MapModel::default();

        for op in ops {
            match op {
                MapOp::Set(k, v) => {
                    map.set(k.as_str(), v);
                    model.set(k, v);
                }
                MapOp::Push(v) => {
                    prop_assert_eq!(map.push(v), model.push(v));
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                MapOp::RemoveFirst => match model.remove_first() {
                    Some(v) => {
                        prop_assert_eq!(map.remove_first(), Ok(v));
                    }
                    None => {
                        prop_assert_eq!(map.remove_first(), Err(CollectionError::EmptyCollection));
                    }
                },
                MapOp::Advance => {
                    map.advance();
                    model.position += 1;
                }
                MapOp::Rewind => {
                    map.rewind();
                    model.position = 0;
                }
            }
            assert_map_matches(&map, &model);
        }
    }

    #[test]
    fn map_cursor_reads_fail_only_when_invalid(
        entries in prop::collection::vec((map_key(), any::<i32>()), 0..8),
        steps in 0usize..12,
    ) {
        let mut map = OrderedMap::from_entries(entries);
        map.rewind();
        prop_assert_eq!(map.is_valid(), !map.is_empty());
        for _ in 0..steps {
            map.advance();
        }
        if map.is_valid() {
            prop_assert!(map.current().is_ok());
            prop_assert_eq!(map.current_key().unwrap(), map.keys()[map.position()].as_str());
        } else {
            let err = CollectionError::IndexOutOfRange { position: map.position(), len: map.len() };
            prop_assert_eq!(map.current_key(), Err(err));
            prop_assert!(map.current().is_err());
        }
    }
}

// =============================================================================
// OrderedSequence
// =============================================================================

#[derive(Debug, Clone)]
enum SeqOp {
    Set(i64, u8),
    Push(u8),
    Remove(i64),
    RemoveFirst,
    Prepend(Vec<u8>),
    Advance,
}

fn seq_op() -> impl Strategy<Value = SeqOp> {
    prop_oneof![
        2 => (-2i64..10, any::<u8>()).prop_map(|(k, v)| SeqOp::Set(k, v)),
        3 => any::<u8>().prop_map(SeqOp::Push),
        2 => (-2i64..10).prop_map(SeqOp::Remove),
        1 => Just(SeqOp::RemoveFirst),
        1 => prop::collection::vec(any::<u8>(), 0..4).prop_map(SeqOp::Prepend),
        2 => Just(SeqOp::Advance),
    ]
}

#[derive(Default)]
struct SeqModel {
    entries: Vec<(i64, u8)>,
    position: usize,
    next_index: i64,
}

impl SeqModel {
    fn set(&mut self, index: i64, value: u8) {
        if index >= self.next_index {
            self.next_index = index + 1;
        }
        match self.entries.iter_mut().find(|(k, _)| *k == index) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((index, value)),
        }
    }

    fn prepend(&mut self, values: &[u8]) -> usize {
        let mut all: Vec<u8> = values.to_vec();
        all.extend(self.entries.iter().map(|(_, v)| *v));
        self.entries = all.into_iter().enumerate().map(|(i, v)| (i as i64, v)).collect();
        self.next_index = self.entries.len() as i64;
        if self.position > 0 {
            self.position += values.len();
        }
        self.entries.len()
    }
}

proptest! {
    #[test]
    fn sequence_follows_model(ops in prop::collection::vec(seq_op(), 0..64)) {
        let mut seq = OrderedSequence::new();
        let mut model = SeqModel::default();

        for op in ops {
            match op {
                SeqOp::Set(k, v) => {
                    prop_assert_eq!(seq.set(k, v), k);
                    model.set(k, v);
                }
                SeqOp::Push(v) => {
                    let expected = model.next_index;
                    prop_assert_eq!(seq.set(Offset::Append, v), expected);
                    model.set(expected, v);
                }
                SeqOp::Remove(k) => {
                    let expected = model
                        .entries
                        .iter()
                        .position(|(i, _)| *i == k)
                        .map(|at| model.entries.remove(at).1);
                    prop_assert_eq!(seq.remove(k), expected);
                }
                SeqOp::RemoveFirst => {
                    if model.entries.is_empty() {
                        prop_assert_eq!(seq.remove_first(), Err(CollectionError::EmptyCollection));
                    } else {
                        let old_len = model.entries.len();
                        let (_, v) = model.entries.remove(0);
                        if model.position == old_len {
                            model.position -= 1;
                        }
                        prop_assert_eq!(seq.remove_first(), Ok(v));
                    }
                }
                SeqOp::Prepend(values) => {
                    let expected = model.prepend(&values);
                    prop_assert_eq!(seq.prepend_many(values), expected);
                }
                SeqOp::Advance => {
                    seq.advance();
                    model.position += 1;
                }
            }

            let keys: Vec<i64> = model.entries.iter().map(|(k, _)| *k).collect();
            let values: Vec<u8> = model.entries.iter().map(|(_, v)| *v).collect();
            prop_assert_eq!(seq.keys(), keys.as_slice());
            prop_assert_eq!(seq.snapshot(), values);
            prop_assert_eq!(seq.len(), model.entries.len());
            prop_assert_eq!(seq.position(), model.position);
        }
    }
}
