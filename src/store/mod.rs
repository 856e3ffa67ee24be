use indexmap::IndexMap;

use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemPatch, NewItem};

/// Process-lifetime inventory.
///
/// - `items`   → `indexmap::IndexMap` keyed by id: O(1) average lookup while
///               iteration follows insertion order, even after removals
///               (`shift_remove` keeps the remaining entries in place).
/// - `next_id` → high-water mark. Ids are handed out monotonically and never
///               reused, including after the newest item is deleted.
///
/// The store itself is plain data; the application shares it behind a
/// `tokio::sync::RwLock` so each mutation runs as one exclusive section.
#[derive(Debug)]
pub struct InventoryStore {
    items: IndexMap<u64, Item>,
    next_id: u64,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
            next_id: 1,
        }
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with a handful of grocery items (ids 1..=3).
    pub fn with_sample_items() -> Self {
        let mut store = Self::new();
        for item in crate::seed::sample_items() {
            store.create(item);
        }
        store
    }

    pub fn list(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> AppResult<Item> {
        self.items
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::item_not_found(id))
    }

    pub fn create(&mut self, new: NewItem) -> Item {
        let id = self.next_id;
        self.next_id += 1;

        let item = Item::from_new(id, new);
        self.items.insert(id, item.clone());
        item
    }

    pub fn update(&mut self, id: u64, patch: ItemPatch) -> AppResult<Item> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::item_not_found(id))?;
        item.apply(patch);
        Ok(item.clone())
    }

    pub fn delete(&mut self, id: u64) -> AppResult<()> {
        self.items
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::item_not_found(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
