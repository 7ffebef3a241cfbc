//! Text format filter pipeline.
//!
//! Subtitles are sanitized on write according to the configured format:
//! - post_html: keeps a small set of inline tags, strips everything else
//! - plain_text: HTML-escapes all content

use std::collections::{HashMap, HashSet};

use crate::error::{SetupError, SetupResult};

/// Trait for text filters in the pipeline.
pub trait TextFilter: Send + Sync {
    /// Filter name for debugging.
    fn name(&self) -> &str;

    /// Process the input text and return filtered output.
    fn process(&self, input: &str) -> String;
}

/// Pipeline of text filters applied in sequence.
pub struct FilterPipeline {
    filters: Vec<Box<dyn TextFilter>>,
}

impl FilterPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add<F: TextFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Create pipeline for a named format.
    pub fn for_format(format: &str) -> SetupResult<Self> {
        match format {
            "post_html" => Ok(Self::post_html()),
            "plain_text" => Ok(Self::plain_text()),
            other => Err(SetupError::UnknownFormat(other.to_string())),
        }
    }

    /// Inline post markup only.
    pub fn post_html() -> Self {
        Self::new().add(PostHtmlFilter)
    }

    /// Create a plain text pipeline (escapes all HTML).
    pub fn plain_text() -> Self {
        Self::new().add(HtmlEscapeFilter)
    }

    /// Names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Process text through all filters in the pipeline.
    pub fn process(&self, input: &str) -> String {
        self.filters
            .iter()
            .fold(input.to_string(), |acc, filter| filter.process(&acc))
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::post_html()
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field("filters", &self.filter_names())
            .finish()
    }
}

/// Filter that escapes all HTML characters.
pub struct HtmlEscapeFilter;

impl TextFilter for HtmlEscapeFilter {
    fn name(&self) -> &str {
        "html_escape"
    }

    fn process(&self, input: &str) -> String {
        input
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#x27;")
    }
}

/// Filter that keeps inline post markup and drops everything else.
///
/// Script and style elements are removed together with their content.
pub struct PostHtmlFilter;

impl PostHtmlFilter {
    /// Inline tags a subtitle may carry.
    pub const ALLOWED_TAGS: &'static [&'static str] = &[
        "a", "abbr", "b", "br", "cite", "code", "del", "em", "i", "ins", "mark", "q", "s",
        "small", "span", "strong", "sub", "sup", "u",
    ];

    /// Attributes allowed on every kept tag.
    const GENERIC_ATTRIBUTES: &'static [&'static str] = &["class", "dir", "lang", "title"];

    fn tag_attributes() -> HashMap<&'static str, HashSet<&'static str>> {
        HashMap::from([
            ("a", HashSet::from(["href", "hreflang", "target"])),
            ("del", HashSet::from(["datetime"])),
            ("ins", HashSet::from(["datetime"])),
            ("q", HashSet::from(["cite"])),
        ])
    }
}

impl TextFilter for PostHtmlFilter {
    fn name(&self) -> &str {
        "post_html"
    }

    fn process(&self, input: &str) -> String {
        let mut builder = ammonia::Builder::default();
        builder
            .tags(Self::ALLOWED_TAGS.iter().copied().collect())
            .tag_attributes(Self::tag_attributes())
            .generic_attributes(Self::GENERIC_ATTRIBUTES.iter().copied().collect());
        builder.clean(input).to_string()
    }
}
