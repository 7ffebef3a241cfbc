//! Content type registry.
//!
//! Holds the content types known to the host together with their capability
//! flags. Populated during setup; later registrations are visible to every
//! subsequent query because nothing downstream caches the results.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use regex::Regex;
use sottotitolo_sdk::types::{BUILTIN_TYPES, ContentTypeDefinition, SUBTITLE_FEATURE};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{SetupError, SetupResult};

/// Content type machine names: lowercase letters, digits, `_` and `-`, at
/// most 20 characters.
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static VALID_TYPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{1,20}$").expect("valid regex literal"));

/// Registry of content types.
///
/// Cheap to clone; all clones share the same definitions.
#[derive(Clone, Default)]
pub struct ContentTypeRegistry {
    inner: Arc<ContentTypeRegistryInner>,
}

#[derive(Default)]
struct ContentTypeRegistryInner {
    types: DashMap<String, ContentTypeDefinition>,
}

impl ContentTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in `post` and `page` types.
    ///
    /// Built-ins start without any capability flags.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for name in BUILTIN_TYPES {
            registry
                .inner
                .types
                .insert(name.to_string(), ContentTypeDefinition::new(name).builtin());
        }
        registry
    }

    /// Build the registry described by a configuration.
    ///
    /// Registers the built-ins, then the types file, then flags every
    /// enabled type with subtitle support.
    pub fn from_config(config: &Config) -> SetupResult<Self> {
        let registry = Self::with_builtins();

        for def in config.load_types()? {
            registry.register(def)?;
        }

        for type_name in &config.enabled_types {
            if !registry.add_support(type_name, SUBTITLE_FEATURE) {
                warn!(type_name = %type_name, "subtitle support enabled for unregistered type");
            }
        }

        info!(
            types = registry.len(),
            supported = registry.types_supporting(SUBTITLE_FEATURE).len(),
            "content types loaded"
        );
        Ok(registry)
    }

    /// Register (or replace) a content type definition.
    pub fn register(&self, def: ContentTypeDefinition) -> SetupResult<()> {
        if !VALID_TYPE_NAME.is_match(&def.machine_name) {
            return Err(SetupError::InvalidTypeName(def.machine_name));
        }
        debug!(type_name = %def.machine_name, builtin = def.builtin, "registered content type");
        self.inner.types.insert(def.machine_name.clone(), def);
        Ok(())
    }

    /// Flag a registered type with a capability.
    ///
    /// Returns false when the type is not registered.
    pub fn add_support(&self, type_name: &str, feature: &str) -> bool {
        match self.inner.types.get_mut(type_name) {
            Some(mut def) => {
                if !def.has_feature(feature) {
                    def.supports.push(feature.to_string());
                }
                true
            }
            None => false,
        }
    }

    /// Remove a capability from a type. Returns whether it was present.
    pub fn remove_support(&self, type_name: &str, feature: &str) -> bool {
        self.inner
            .types
            .get_mut(type_name)
            .map(|mut def| {
                let before = def.supports.len();
                def.supports.retain(|f| f != feature);
                def.supports.len() != before
            })
            .unwrap_or(false)
    }

    /// Whether a type is registered and carries the capability.
    pub fn type_supports(&self, type_name: &str, feature: &str) -> bool {
        self.inner
            .types
            .get(type_name)
            .is_some_and(|def| def.has_feature(feature))
    }

    /// Names of registered types that are not built-ins, sorted.
    pub fn custom_type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .types
            .iter()
            .filter(|r| !r.value().builtin)
            .map(|r| r.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Names of registered types carrying the capability, sorted.
    pub fn types_supporting(&self, feature: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .types
            .iter()
            .filter(|r| r.value().has_feature(feature))
            .map(|r| r.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Get a content type by machine name.
    pub fn get(&self, type_name: &str) -> Option<ContentTypeDefinition> {
        self.inner.types.get(type_name).map(|r| r.clone())
    }

    /// Check if a content type exists.
    pub fn exists(&self, type_name: &str) -> bool {
        self.inner.types.contains_key(type_name)
    }

    /// Unregister a content type.
    pub fn unregister(&self, type_name: &str) -> Option<ContentTypeDefinition> {
        self.inner.types.remove(type_name).map(|(_, def)| def)
    }

    /// Get the number of registered content types.
    pub fn len(&self) -> usize {
        self.inner.types.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.types.is_empty()
    }
}

impl std::fmt::Debug for ContentTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<String> = self.inner.types.iter().map(|r| r.key().clone()).collect();
        names.sort();
        f.debug_struct("ContentTypeRegistry")
            .field("types", &names)
            .finish()
    }
}
