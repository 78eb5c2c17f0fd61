//! # Stash Snapshot
//!
//! Owned snapshot of every item the character can reach, grouped by
//! storage location. Built once per refresh of game data and then only read.

use std::collections::HashSet;

use crate::error::{ItemsError, ItemsResult};
use crate::item::{Item, ItemId, StorageLocation};

/// Storage inventory query.
///
/// Implemented by anything that can enumerate items by location. The
/// retention engine only ever reads through this trait.
pub trait StorageQuery {
    /// Every item currently stored in any of `locations`.
    fn items_in(&self, locations: &[StorageLocation]) -> Vec<&Item>;
}

/// An owned stash snapshot.
#[derive(Clone, Debug, Default)]
pub struct Stash {
    /// Items in insertion order.
    items: Vec<Item>,
    /// Unit ids already present.
    ids: HashSet<ItemId>,
}

impl Stash {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from a list of items.
    ///
    /// # Errors
    ///
    /// Returns `ItemsError::DuplicateItem` if two items share a unit id.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> ItemsResult<Self> {
        let mut stash = Self::new();
        for item in items {
            stash.insert(item)?;
        }
        Ok(stash)
    }

    /// Inserts an item.
    ///
    /// # Errors
    ///
    /// Returns `ItemsError::DuplicateItem` if the unit id is already present.
    pub fn insert(&mut self, item: Item) -> ItemsResult<()> {
        if !self.ids.insert(item.id) {
            return Err(ItemsError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Returns the number of items in the snapshot.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the snapshot is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

impl StorageQuery for Stash {
    fn items_in(&self, locations: &[StorageLocation]) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| locations.contains(&i.location))
            .collect()
    }
}
