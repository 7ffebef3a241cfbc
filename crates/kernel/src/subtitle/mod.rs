//! Subtitle field.
//!
//! This module provides:
//! - SubtitleAccessor: gated read/write access to an item's subtitle
//! - template: `get_the_subtitle` / `the_subtitle` helpers for themes
//! - shortcode: the `[wp_subtitle]` shortcode

mod accessor;
pub mod shortcode;
pub mod template;

pub use accessor::{DEFAULT_META_KEY, SubtitleAccessor};
pub use shortcode::{ShortcodeAttributes, expand_shortcodes, render_shortcode};
pub use template::{get_the_subtitle, the_subtitle};
