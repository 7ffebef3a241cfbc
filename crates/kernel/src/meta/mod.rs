//! Host storage contracts.
//!
//! The kernel never persists anything itself. Hosts implement [`ItemStore`]
//! and [`MetaStore`]; [`MemoryStore`] is an in-process implementation of
//! both.

mod memory;

use sottotitolo_sdk::types::{ContentItem, MetaUpdateResult};

pub use memory::MemoryStore;

/// Lookup of content items by id.
pub trait ItemStore: Send + Sync {
    /// Load an item, or None if the host has no item with this id.
    fn load(&self, item_id: u64) -> Option<ContentItem>;
}

/// Per-item key/value metadata storage.
pub trait MetaStore: Send + Sync {
    /// Single value stored under `key` for the item.
    fn get(&self, item_id: u64, key: &str) -> Option<String>;

    /// Insert or replace the value stored under `key`.
    ///
    /// The returned tri-state is the store's own contract and is passed to
    /// callers untouched.
    fn update(&self, item_id: u64, key: &str, value: &str) -> MetaUpdateResult;
}
