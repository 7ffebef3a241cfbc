//! Tap registry - the named extension points the subtitle accessor invokes.
//!
//! Two taps exist:
//! - `subtitle-filter`: transforms the stored value before it is wrapped
//! - `subtitle-key-filter`: redirects the metadata key before any lookup

use sottotitolo_sdk::types::ContentItem;

use super::FilterChain;

/// Tap applied to the raw subtitle, with the item as context.
pub const TAP_SUBTITLE: &str = "subtitle-filter";

/// Tap applied to the metadata key, with the item id as context.
pub const TAP_SUBTITLE_KEY: &str = "subtitle-key-filter";

/// The extension points consulted by the subtitle accessor.
#[derive(Debug)]
pub struct TapRegistry {
    subtitle: FilterChain<ContentItem>,
    subtitle_key: FilterChain<u64>,
}

impl TapRegistry {
    /// Create a registry with no handlers.
    pub fn new() -> Self {
        Self {
            subtitle: FilterChain::new(TAP_SUBTITLE),
            subtitle_key: FilterChain::new(TAP_SUBTITLE_KEY),
        }
    }

    /// Register a `subtitle-filter` handler.
    pub fn on_subtitle<F>(&self, name: impl Into<String>, weight: i32, func: F)
    where
        F: Fn(String, &ContentItem) -> String + Send + Sync + 'static,
    {
        self.subtitle.add(name, weight, func);
    }

    /// Register a `subtitle-key-filter` handler.
    pub fn on_subtitle_key<F>(&self, name: impl Into<String>, weight: i32, func: F)
    where
        F: Fn(String, &u64) -> String + Send + Sync + 'static,
    {
        self.subtitle_key.add(name, weight, func);
    }

    /// The `subtitle-filter` chain.
    pub fn subtitle(&self) -> &FilterChain<ContentItem> {
        &self.subtitle
    }

    /// The `subtitle-key-filter` chain.
    pub fn subtitle_key(&self) -> &FilterChain<u64> {
        &self.subtitle_key
    }

    /// Check if any handler implements a tap.
    pub fn has_tap(&self, tap_name: &str) -> bool {
        self.handler_count(tap_name) > 0
    }

    /// Get the count of handlers for a tap. Unknown taps have none.
    pub fn handler_count(&self, tap_name: &str) -> usize {
        match tap_name {
            TAP_SUBTITLE => self.subtitle.handler_count(),
            TAP_SUBTITLE_KEY => self.subtitle_key.handler_count(),
            _ => 0,
        }
    }

    /// Remove a named handler from whichever tap holds it.
    pub fn remove(&self, name: &str) -> usize {
        self.subtitle.remove(name) + self.subtitle_key.remove(name)
    }

    /// Get all tap names.
    pub fn tap_names(&self) -> [&'static str; 2] {
        [self.subtitle.tap_name(), self.subtitle_key.tap_name()]
    }
}

impl Default for TapRegistry {
    fn default() -> Self {
        Self::new()
    }
}
