//! Services shared by every subtitle accessor.

use std::sync::Arc;

use sottotitolo_sdk::types::ItemRef;
use tracing::info;

use crate::config::Config;
use crate::content::{ContentTypeRegistry, FilterPipeline};
use crate::error::SetupResult;
use crate::meta::{ItemStore, MemoryStore, MetaStore};
use crate::subtitle::SubtitleAccessor;
use crate::tap::TapRegistry;

/// Host services the accessor delegates to.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct SubtitleServices {
    inner: Arc<SubtitleServicesInner>,
}

struct SubtitleServicesInner {
    types: ContentTypeRegistry,
    items: Arc<dyn ItemStore>,
    meta: Arc<dyn MetaStore>,
    taps: TapRegistry,
    sanitizer: FilterPipeline,
}

impl SubtitleServices {
    /// Create services over separate item and metadata stores.
    pub fn new(
        types: ContentTypeRegistry,
        items: Arc<dyn ItemStore>,
        meta: Arc<dyn MetaStore>,
    ) -> Self {
        Self::with_sanitizer(types, items, meta, FilterPipeline::post_html())
    }

    /// Create services with an explicit write sanitizer.
    pub fn with_sanitizer(
        types: ContentTypeRegistry,
        items: Arc<dyn ItemStore>,
        meta: Arc<dyn MetaStore>,
        sanitizer: FilterPipeline,
    ) -> Self {
        Self {
            inner: Arc::new(SubtitleServicesInner {
                types,
                items,
                meta,
                taps: TapRegistry::new(),
                sanitizer,
            }),
        }
    }

    /// Create services over a single store implementing both contracts.
    pub fn from_store<S>(types: ContentTypeRegistry, store: Arc<S>) -> Self
    where
        S: ItemStore + MetaStore + 'static,
    {
        let items: Arc<dyn ItemStore> = store.clone();
        let meta: Arc<dyn MetaStore> = store;
        Self::new(types, items, meta)
    }

    /// Build in-memory services from configuration.
    ///
    /// Returns the store as well so the caller can seed items.
    pub fn in_memory(config: &Config) -> SetupResult<(Self, Arc<MemoryStore>)> {
        let types = ContentTypeRegistry::from_config(config)?;
        let sanitizer = FilterPipeline::for_format(&config.subtitle_format)?;
        let store = Arc::new(MemoryStore::new());

        let items: Arc<dyn ItemStore> = store.clone();
        let meta: Arc<dyn MetaStore> = store.clone();
        let services = Self::with_sanitizer(types, items, meta, sanitizer);

        info!(format = %config.subtitle_format, "in-memory subtitle services ready");
        Ok((services, store))
    }

    /// Accessor for a single item.
    pub fn subtitle<'i>(&self, item: impl Into<ItemRef<'i>>) -> SubtitleAccessor<'_> {
        SubtitleAccessor::new(item, self)
    }

    /// Get the content type registry.
    pub fn types(&self) -> &ContentTypeRegistry {
        &self.inner.types
    }

    /// Get the item store.
    pub fn items(&self) -> &dyn ItemStore {
        self.inner.items.as_ref()
    }

    /// Get the metadata store.
    pub fn meta(&self) -> &dyn MetaStore {
        self.inner.meta.as_ref()
    }

    /// Get the tap registry.
    pub fn taps(&self) -> &TapRegistry {
        &self.inner.taps
    }

    /// Get the sanitizer applied on write.
    pub fn sanitizer(&self) -> &FilterPipeline {
        &self.inner.sanitizer
    }
}

impl std::fmt::Debug for SubtitleServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubtitleServices")
            .field("types", &self.inner.types)
            .field("items", &"dyn ItemStore")
            .field("meta", &"dyn MetaStore")
            .field("taps", &self.inner.taps)
            .field("sanitizer", &self.inner.sanitizer)
            .finish()
    }
}
