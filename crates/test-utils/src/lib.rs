//! Sottotitolo test utilities.
//!
//! Helpers for integration testing: seeded services, item fixtures, tracing
//! setup and assertion utilities.

use std::sync::{Arc, Once};

use sottotitolo_kernel::meta::MemoryStore;
use sottotitolo_kernel::{Config, SubtitleServices};
use sottotitolo_sdk::types::{ContentItem, ContentTypeDefinition, SUBTITLE_FEATURE};
use tracing_subscriber::EnvFilter;

/// A `post` item. Supported by default.
pub const POST_ID: u64 = 1;
/// A `page` item. Supported by default.
pub const PAGE_ID: u64 = 2;
/// An `attachment` item. Never registered, never supported.
pub const ATTACHMENT_ID: u64 = 3;
/// A `book` item. Custom type with subtitle support.
pub const BOOK_ID: u64 = 4;
/// An `event` item. Custom type without subtitle support.
pub const EVENT_ID: u64 = 5;

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary. Honors `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Create a test item with default values.
pub fn test_item(id: u64, item_type: &str) -> ContentItem {
    ContentItem::new(id, item_type).title(format!("Test {item_type} {id}"))
}

/// In-memory services with the default configuration plus a subtitle-enabled
/// `book` type and an `event` type without support.
///
/// Seeds one item per `*_ID` constant.
pub fn seeded_services() -> (SubtitleServices, Arc<MemoryStore>) {
    init_tracing();

    let (services, store) = match SubtitleServices::in_memory(&Config::default()) {
        Ok(pair) => pair,
        Err(e) => panic!("default configuration must load: {e}"),
    };

    let types = services.types();
    for def in [
        ContentTypeDefinition::new("book")
            .label("Book")
            .supports(SUBTITLE_FEATURE),
        ContentTypeDefinition::new("event").label("Event"),
    ] {
        if let Err(e) = types.register(def) {
            panic!("fixture type must register: {e}");
        }
    }

    for (id, item_type) in [
        (POST_ID, "post"),
        (PAGE_ID, "page"),
        (ATTACHMENT_ID, "attachment"),
        (BOOK_ID, "book"),
        (EVENT_ID, "event"),
    ] {
        store.insert_item(test_item(id, item_type));
    }

    (services, store)
}

/// Assertion helpers for rendered output.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }
}
