//! `[wp_subtitle]` shortcode.
//!
//! Renders the current item's subtitle inside a wrapper element:
//!
//! ```text
//! [wp_subtitle tag="h2" before="~ " after=" ~"]
//! <h2 class="wp-subtitle">~ The subtitle ~</h2>
//! ```
//!
//! Nothing is rendered when the item has no subtitle.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use sottotitolo_sdk::types::DisplayOptions;

use super::SubtitleAccessor;

/// Shortcode name.
pub const SHORTCODE_TAG: &str = "wp_subtitle";

/// Wrapper elements the `tag` attribute may name.
const ALLOWED_WRAPPER_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "span", "strong", "em", "div",
];

const DEFAULT_WRAPPER_TAG: &str = "p";

/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[{SHORTCODE_TAG}(?:\s+([^\]]*))?\s*/?\]"))
        .expect("valid regex literal")
});

#[allow(clippy::expect_used)]
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#)
        .expect("valid regex literal")
});

/// Parsed shortcode attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeAttributes {
    pub tag: String,
    pub before: String,
    pub after: String,
}

impl Default for ShortcodeAttributes {
    fn default() -> Self {
        Self {
            tag: DEFAULT_WRAPPER_TAG.to_string(),
            before: String::new(),
            after: String::new(),
        }
    }
}

impl ShortcodeAttributes {
    /// Parse `name="value"` pairs. Names are case-insensitive; unknown names
    /// are ignored.
    pub fn parse(text: &str) -> Self {
        let mut attrs = Self::default();
        for caps in ATTRIBUTE.captures_iter(text) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            match caps[1].to_lowercase().as_str() {
                "tag" => attrs.tag = value,
                "before" => attrs.before = value,
                "after" => attrs.after = value,
                _ => {}
            }
        }
        attrs
    }

    /// The wrapper element, falling back to `p` for anything not allowed.
    pub fn wrapper_tag(&self) -> &str {
        let tag = self.tag.trim();
        ALLOWED_WRAPPER_TAGS
            .iter()
            .find(|allowed| allowed.eq_ignore_ascii_case(tag))
            .copied()
            .unwrap_or(DEFAULT_WRAPPER_TAG)
    }

    fn display_options(&self) -> DisplayOptions {
        let tag = self.wrapper_tag();
        DisplayOptions::new(
            format!(r#"<{tag} class="wp-subtitle">{}"#, self.before),
            format!("{}</{tag}>", self.after),
        )
    }
}

/// Render one shortcode for the accessor's item.
pub fn render_shortcode(accessor: &SubtitleAccessor<'_>, attrs: &ShortcodeAttributes) -> String {
    accessor.get_subtitle(&attrs.display_options())
}

/// Replace every `[wp_subtitle ...]` in `content` with the rendered subtitle.
///
/// Content without shortcodes is returned borrowed.
///
/// A shortcode ends at the first `]`, quoted or not, so an attribute value
/// cannot contain `]`: `[wp_subtitle after="]"]` closes after `after="` and
/// leaves `"]` in the output.
pub fn expand_shortcodes<'c>(content: &'c str, accessor: &SubtitleAccessor<'_>) -> Cow<'c, str> {
    SHORTCODE.replace_all(content, |caps: &Captures<'_>| {
        let attrs = caps
            .get(1)
            .map(|m| ShortcodeAttributes::parse(m.as_str()))
            .unwrap_or_default();
        render_shortcode(accessor, &attrs)
    })
}
