//! The ordered byte-store collaborator.
//!
//! [RawCursor] is the entire surface this crate consumes from a storage
//! engine: point/seek/range primitives over flat byte-string keys with
//! unsigned lexicographic sort order. Transactions, durability and locking
//! are the engine's business and are invisible here.
//!
//! [MemStore] is a `BTreeMap`-backed implementation used by the tests and as
//! a reference binding.

use std::collections::BTreeMap;
use std::ops::Bound;

use log::trace;

/// A positionable cursor over an ordered byte-string key space.
///
/// A cursor is either positioned on an entry or unpositioned (after a failed
/// seek, or before any seek). `move_next` from unpositioned goes to the first
/// entry and `move_previous` to the last, which is what the floor/last seek
/// algorithms in [crate::typed] and [crate::view] rely on.
pub trait RawCursor {
    /// Positions on the first entry. `false` if the store is empty.
    fn seek_first(&mut self) -> bool;
    /// Positions on the last entry. `false` if the store is empty.
    fn seek_last(&mut self) -> bool;
    /// Positions on exactly `key`. `false` if absent.
    fn seek_exact(&mut self, key: &[u8]) -> bool;
    /// Positions on the first entry with key `>= key`. `false` if none.
    fn seek_ceiling(&mut self, key: &[u8]) -> bool;
    /// Steps to the next entry in key order.
    fn move_next(&mut self) -> bool;
    /// Steps to the previous entry in key order.
    fn move_previous(&mut self) -> bool;
    /// Key of the current entry. Panics if unpositioned.
    fn key(&self) -> &[u8];
    /// Value of the current entry. Panics if unpositioned or deleted.
    fn value(&self) -> &[u8];
    /// Inserts or updates `key`, leaving the cursor positioned on it.
    fn put(&mut self, key: &[u8], value: &[u8]);
    /// Deletes the current entry. The cursor keeps the deleted key as its
    /// position, so `move_next`/`move_previous` still step relative to it.
    fn delete_current(&mut self) -> bool;
}

impl<T: RawCursor + ?Sized> RawCursor for &mut T {
    fn seek_first(&mut self) -> bool {
        (**self).seek_first()
    }

    fn seek_last(&mut self) -> bool {
        (**self).seek_last()
    }

    fn seek_exact(&mut self, key: &[u8]) -> bool {
        (**self).seek_exact(key)
    }

    fn seek_ceiling(&mut self, key: &[u8]) -> bool {
        (**self).seek_ceiling(key)
    }

    fn move_next(&mut self) -> bool {
        (**self).move_next()
    }

    fn move_previous(&mut self) -> bool {
        (**self).move_previous()
    }

    fn key(&self) -> &[u8] {
        (**self).key()
    }

    fn value(&self) -> &[u8] {
        (**self).value()
    }

    fn put(&mut self, key: &[u8], value: &[u8]) {
        (**self).put(key, value)
    }

    fn delete_current(&mut self) -> bool {
        (**self).delete_current()
    }
}

/// In-memory ordered store.
#[derive(Debug, Default)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&mut self) -> MemCursor<'_> {
        MemCursor {
            store: self,
            position: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cursor over a [MemStore]. One cursor at a time per store; the mutable
/// borrow enforces it.
pub struct MemCursor<'s> {
    store: &'s mut MemStore,
    position: Option<Vec<u8>>,
}

impl MemCursor<'_> {
    fn position_at(&mut self, key: Option<Vec<u8>>) -> bool {
        let found = key.is_some();
        self.position = key;
        found
    }
}

impl RawCursor for MemCursor<'_> {
    fn seek_first(&mut self) -> bool {
        let first = self.store.entries.keys().next().cloned();
        self.position_at(first)
    }

    fn seek_last(&mut self) -> bool {
        let last = self.store.entries.keys().next_back().cloned();
        self.position_at(last)
    }

    fn seek_exact(&mut self, key: &[u8]) -> bool {
        if self.store.entries.contains_key(key) {
            self.position_at(Some(key.to_vec()))
        } else {
            self.position_at(None)
        }
    }

    fn seek_ceiling(&mut self, key: &[u8]) -> bool {
        let ceiling = self
            .store
            .entries
            .range::<[u8], _>((Bound::Included(key), Bound::Unbounded))
            .next()
            .map(|(k, _)| k.clone());
        self.position_at(ceiling)
    }

    fn move_next(&mut self) -> bool {
        let next = match &self.position {
            Some(cur) => self
                .store
                .entries
                .range::<[u8], _>((Bound::Excluded(cur.as_slice()), Bound::Unbounded))
                .next()
                .map(|(k, _)| k.clone()),
            None => self.store.entries.keys().next().cloned(),
        };
        self.position_at(next)
    }

    fn move_previous(&mut self) -> bool {
        let prev = match &self.position {
            Some(cur) => self
                .store
                .entries
                .range::<[u8], _>((Bound::Unbounded, Bound::Excluded(cur.as_slice())))
                .next_back()
                .map(|(k, _)| k.clone()),
            None => self.store.entries.keys().next_back().cloned(),
        };
        self.position_at(prev)
    }

    fn key(&self) -> &[u8] {
        self.position.as_deref().expect("cursor is not positioned")
    }

    fn value(&self) -> &[u8] {
        let key = self.position.as_deref().expect("cursor is not positioned");
        self.store
            .entries
            .get(key)
            .expect("cursor is positioned on a deleted entry")
    }

    fn put(&mut self, key: &[u8], value: &[u8]) {
        trace!("put {} key bytes, {} value bytes", key.len(), value.len());
        self.store.entries.insert(key.to_vec(), value.to_vec());
        self.position = Some(key.to_vec());
    }

    fn delete_current(&mut self) -> bool {
        let key = self.position.clone().expect("cursor is not positioned");
        trace!("delete {} key bytes", key.len());
        self.store.entries.remove(&key).is_some()
    }
}
