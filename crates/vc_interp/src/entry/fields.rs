use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::Entry;

// -----------------------------------------------------------------------------
// Fields

/// The accessor table of an object or root entry.
///
/// Keys keep their definition order. Each key owns exactly one slot.
#[derive(Debug, Default)]
pub(crate) struct Fields {
    slots: Vec<Entry>,
    keys: Vec<Box<str>>,
    indices: HashMap<Box<str>, usize, FixedState>,
}

impl Fields {
    /// Defines an accessor for `key` holding `entry`.
    ///
    /// If the key already exists, its slot is overwritten and the previous
    /// entry is returned.
    pub fn define(&mut self, key: &str, entry: Entry) -> Option<Entry> {
        if let Some(index) = self.indices.get(key) {
            return Some(mem::replace(&mut self.slots[*index], entry));
        }
        self.slots.push(entry);
        self.keys.push(key.into());
        self.indices.insert(key.into(), self.slots.len() - 1);
        None
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        let index = *self.indices.get(key)?;
        self.slots.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        let index = *self.indices.get(key)?;
        self.slots.get_mut(index)
    }

    /// Deletes the accessor and its slot together.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let index = self.indices.remove(key)?;
        self.keys.remove(index);
        let entry = self.slots.remove(index);
        for slot in self.indices.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(entry)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.keys.iter().map(|key| &**key)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Entry)> {
        self.keys.iter().map(|key| &**key).zip(self.slots.iter())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

// -----------------------------------------------------------------------------
// Tests
