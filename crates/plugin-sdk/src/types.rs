//! Core types shared between the kernel and code that extends it.
//!
//! Hosts hand `ContentItem`s to the kernel, and taps receive them as
//! read-only context.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Capability flag a content type carries when it opts in to subtitles.
pub const SUBTITLE_FEATURE: &str = "subtitle-support";

/// Built-in content types that are always considered for subtitle support.
pub const BUILTIN_TYPES: [&str; 2] = ["post", "page"];

/// A content item (article, page, ...) as exposed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Host identifier. Zero is never a valid item.
    pub id: u64,

    /// Content type machine name (e.g., "post", "page", "book").
    pub item_type: String,

    /// Item title.
    #[serde(default)]
    pub title: String,
}

impl ContentItem {
    pub fn new(id: u64, item_type: impl Into<String>) -> Self {
        Self {
            id,
            item_type: item_type.into(),
            title: String::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Either a full item or a raw identifier.
///
/// Resolved once into an unsigned id via [`ItemRef::normalized_id`].
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Item(&'a ContentItem),
    Id(i64),
    Unsigned(u64),
}

impl ItemRef<'_> {
    /// Absolute value of the provided id. Negative input maps to its
    /// magnitude; anything unusable collapses to zero.
    pub fn normalized_id(&self) -> u64 {
        match self {
            ItemRef::Item(item) => item.id,
            ItemRef::Id(id) => id.unsigned_abs(),
            ItemRef::Unsigned(id) => *id,
        }
    }
}

impl<'a> From<&'a ContentItem> for ItemRef<'a> {
    fn from(item: &'a ContentItem) -> Self {
        ItemRef::Item(item)
    }
}

impl From<i64> for ItemRef<'_> {
    fn from(id: i64) -> Self {
        ItemRef::Id(id)
    }
}

impl From<i32> for ItemRef<'_> {
    fn from(id: i32) -> Self {
        ItemRef::Id(i64::from(id))
    }
}

impl From<u64> for ItemRef<'_> {
    fn from(id: u64) -> Self {
        ItemRef::Unsigned(id)
    }
}

impl From<u32> for ItemRef<'_> {
    fn from(id: u32) -> Self {
        ItemRef::Unsigned(u64::from(id))
    }
}

/// Outcome of a metadata upsert, exactly as the store reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaUpdateResult {
    /// A new entry was created with this meta id.
    Created(u64),
    /// An existing entry changed.
    Updated,
    /// Nothing was written (same value, or empty value for a missing key).
    Unchanged,
}

impl MetaUpdateResult {
    /// Whether the store wrote anything.
    pub fn is_written(&self) -> bool {
        !matches!(self, MetaUpdateResult::Unchanged)
    }

    /// Meta id of a freshly created entry.
    pub fn created_id(&self) -> Option<u64> {
        match self {
            MetaUpdateResult::Created(id) => Some(*id),
            _ => None,
        }
    }
}

/// Wrapping markup for a rendered subtitle.
///
/// Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub before: String,
    pub after: String,
}

impl DisplayOptions {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }

    /// Build options from a JSON object, falling back to defaults for
    /// anything that is not an object.
    pub fn from_json(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Parse a query-string style argument list (`before=<b>&after=</b>`).
    ///
    /// Pairs without `=` and unrecognized keys are skipped. Keys and values
    /// are form-decoded (`+` is a space, `%XX` escapes are expanded).
    pub fn parse(args: &str) -> Self {
        let mut options = Self::default();
        for pair in args.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match form_decode(key).trim() {
                "before" => options.before = form_decode(value),
                "after" => options.after = form_decode(value),
                _ => {}
            }
        }
        options
    }

    /// Wrap a non-empty value; empty values stay empty.
    pub fn wrap(&self, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        format!("{}{value}{}", self.before, self.after)
    }
}

/// Decode one `application/x-www-form-urlencoded` component. Escapes that
/// do not decode to UTF-8 leave the component as written.
fn form_decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map(Cow::into_owned);
    decoded.unwrap_or(spaced)
}

/// A content type declaration as registered with the kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDefinition {
    pub machine_name: String,
    #[serde(default)]
    pub label: String,
    /// Built-in types ship with the host rather than being registered.
    #[serde(default)]
    pub builtin: bool,
    /// Capability flags, e.g. [`SUBTITLE_FEATURE`].
    #[serde(default)]
    pub supports: Vec<String>,
}

impl ContentTypeDefinition {
    pub fn new(machine_name: impl Into<String>) -> Self {
        let machine_name = machine_name.into();
        Self {
            label: machine_name.clone(),
            machine_name,
            builtin: false,
            supports: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    pub fn supports(mut self, feature: impl Into<String>) -> Self {
        let feature = feature.into();
        if !self.supports.contains(&feature) {
            self.supports.push(feature);
        }
        self
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.supports.iter().any(|f| f == feature)
    }
}
