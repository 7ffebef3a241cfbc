//! In-memory item and metadata store.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sottotitolo_sdk::types::{ContentItem, MetaUpdateResult};
use tracing::trace;

use super::{ItemStore, MetaStore};

#[derive(Debug, Clone)]
struct MetaEntry {
    meta_id: u64,
    value: String,
}

/// Items and metadata held in process memory.
///
/// Meta ids are allocated sequentially starting at 1.
#[derive(Debug)]
pub struct MemoryStore {
    items: DashMap<u64, ContentItem>,
    meta: DashMap<(u64, String), MetaEntry>,
    next_meta_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            meta: DashMap::new(),
            next_meta_id: AtomicU64::new(1),
        }
    }

    /// Insert or replace an item.
    pub fn insert_item(&self, item: ContentItem) {
        self.items.insert(item.id, item);
    }

    /// Remove an item. Its metadata is left in place.
    pub fn remove_item(&self, item_id: u64) -> Option<ContentItem> {
        self.items.remove(&item_id).map(|(_, item)| item)
    }

    /// Change the content type of a stored item.
    pub fn set_item_type(&self, item_id: u64, item_type: &str) -> bool {
        match self.items.get_mut(&item_id) {
            Some(mut item) => {
                item.item_type = item_type.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a metadata entry. Returns whether it existed.
    pub fn delete(&self, item_id: u64, key: &str) -> bool {
        self.meta.remove(&(item_id, key.to_string())).is_some()
    }

    /// Meta id of an existing entry.
    pub fn meta_id(&self, item_id: u64, key: &str) -> Option<u64> {
        self.meta
            .get(&(item_id, key.to_string()))
            .map(|entry| entry.meta_id)
    }

    /// Number of metadata entries across all items.
    pub fn meta_count(&self) -> usize {
        self.meta.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for MemoryStore {
    fn load(&self, item_id: u64) -> Option<ContentItem> {
        self.items.get(&item_id).map(|r| r.clone())
    }
}

impl MetaStore for MemoryStore {
    fn get(&self, item_id: u64, key: &str) -> Option<String> {
        self.meta
            .get(&(item_id, key.to_string()))
            .map(|entry| entry.value.clone())
    }

    fn update(&self, item_id: u64, key: &str, value: &str) -> MetaUpdateResult {
        // The entry guard holds the shard lock across the check and the write.
        match self.meta.entry((item_id, key.to_string())) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.value == value {
                    return MetaUpdateResult::Unchanged;
                }
                entry.value = value.to_string();
                trace!(item_id, key, meta_id = entry.meta_id, "meta updated");
                MetaUpdateResult::Updated
            }
            Entry::Vacant(_) if value.is_empty() => MetaUpdateResult::Unchanged,
            Entry::Vacant(vacant) => {
                let meta_id = self.next_meta_id.fetch_add(1, Ordering::Relaxed);
                vacant.insert(MetaEntry {
                    meta_id,
                    value: value.to_string(),
                });
                trace!(item_id, key, meta_id, "meta created");
                MetaUpdateResult::Created(meta_id)
            }
        }
    }
}
