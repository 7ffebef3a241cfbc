//! Subtitle accessor.
//!
//! Reads and writes the subtitle stored as metadata on a content item. Reads
//! and writes only happen for items whose content type opted in to subtitle
//! support; everything else degrades to an empty string or
//! [`MetaUpdateResult::Unchanged`].

use std::io::{self, Write};

use sottotitolo_sdk::types::{
    BUILTIN_TYPES, ContentItem, DisplayOptions, ItemRef, MetaUpdateResult, SUBTITLE_FEATURE,
};
use tracing::debug;

use crate::state::SubtitleServices;

/// Metadata key subtitles are stored under unless a tap redirects it.
pub const DEFAULT_META_KEY: &str = "wps_subtitle";

/// Accessor for one item's subtitle.
///
/// Holds only the normalized item id; everything else is looked up through
/// the shared services on each call.
#[derive(Debug, Clone, Copy)]
pub struct SubtitleAccessor<'a> {
    item_id: u64,
    services: &'a SubtitleServices,
}

impl<'a> SubtitleAccessor<'a> {
    /// Create an accessor for an item or a raw id.
    pub fn new<'i>(item: impl Into<ItemRef<'i>>, services: &'a SubtitleServices) -> Self {
        Self {
            item_id: item.into().normalized_id(),
            services,
        }
    }

    /// The normalized item id (0 when invalid).
    pub fn item_id(&self) -> u64 {
        self.item_id
    }

    /// Write the subtitle to `out`.
    pub fn render_subtitle<W: Write + ?Sized>(
        &self,
        out: &mut W,
        options: &DisplayOptions,
    ) -> io::Result<()> {
        out.write_all(self.get_subtitle(options).as_bytes())
    }

    /// The filtered subtitle, wrapped in `before`/`after` when non-empty.
    pub fn get_subtitle(&self, options: &DisplayOptions) -> String {
        let Some(item) = self.supported_item() else {
            return String::new();
        };

        let subtitle = self
            .services
            .taps()
            .subtitle()
            .apply(self.get_raw_subtitle(), &item);

        options.wrap(&subtitle)
    }

    /// The stored value, unfiltered. Empty when nothing is stored.
    pub fn get_raw_subtitle(&self) -> String {
        if self.item_id == 0 {
            return String::new();
        }
        self.services
            .meta()
            .get(self.item_id, &self.meta_key())
            .unwrap_or_default()
    }

    /// Sanitize and store a new subtitle.
    ///
    /// The store's result is returned as-is.
    pub fn update_subtitle(&self, value: &str) -> MetaUpdateResult {
        if self.supported_item().is_none() {
            return MetaUpdateResult::Unchanged;
        }

        let key = self.meta_key();
        let sanitized = self.services.sanitizer().process(value);
        let result = self.services.meta().update(self.item_id, &key, &sanitized);

        debug!(item_id = self.item_id, key = %key, ?result, "subtitle updated");
        result
    }

    /// Whether the item exists and its type supports subtitles.
    pub fn is_supported_type(&self) -> bool {
        self.supported_item().is_some()
    }

    /// Content types that currently support subtitles.
    ///
    /// Recomputed on every call: registered custom types plus the built-ins,
    /// filtered by the subtitle capability.
    pub fn supported_types(&self) -> Vec<String> {
        let types = self.services.types();
        let mut candidates = types.custom_type_names();
        for builtin in BUILTIN_TYPES {
            if !candidates.iter().any(|t| t == builtin) {
                candidates.push(builtin.to_string());
            }
        }
        candidates.retain(|t| types.type_supports(t, SUBTITLE_FEATURE));
        candidates
    }

    /// Effective metadata key. Both the read and the write path go through
    /// here.
    pub(crate) fn meta_key(&self) -> String {
        self.services
            .taps()
            .subtitle_key()
            .apply(DEFAULT_META_KEY.to_string(), &self.item_id)
    }

    /// The item, if it exists and its type is supported.
    fn supported_item(&self) -> Option<ContentItem> {
        if self.item_id == 0 {
            debug!("subtitle skipped for invalid item id");
            return None;
        }

        let Some(item) = self.services.items().load(self.item_id) else {
            debug!(item_id = self.item_id, "subtitle skipped for missing item");
            return None;
        };

        if !self.supported_types().contains(&item.item_type) {
            debug!(
                item_id = self.item_id,
                item_type = %item.item_type,
                "subtitle skipped for unsupported type"
            );
            return None;
        }

        Some(item)
    }
}
