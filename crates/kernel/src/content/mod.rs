//! Content management module.
//!
//! This module provides:
//! - ContentTypeRegistry: content types and their capability flags
//! - FilterPipeline: text sanitization applied when subtitles are written

mod filter;
mod type_registry;

pub use filter::{FilterPipeline, HtmlEscapeFilter, PostHtmlFilter, TextFilter};
pub use type_registry::ContentTypeRegistry;
