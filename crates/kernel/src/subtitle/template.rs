//! Template helpers.
//!
//! Shorthands for themes that only need the wrapped subtitle of one item.

use std::io::{self, Write};

use sottotitolo_sdk::types::{DisplayOptions, ItemRef};

use crate::state::SubtitleServices;

/// The wrapped subtitle of an item, or an empty string.
pub fn get_the_subtitle<'i>(
    services: &SubtitleServices,
    item: impl Into<ItemRef<'i>>,
    before: &str,
    after: &str,
) -> String {
    services
        .subtitle(item)
        .get_subtitle(&DisplayOptions::new(before, after))
}

/// Write the wrapped subtitle of an item to `out`.
pub fn the_subtitle<'i, W: Write + ?Sized>(
    services: &SubtitleServices,
    item: impl Into<ItemRef<'i>>,
    before: &str,
    after: &str,
    out: &mut W,
) -> io::Result<()> {
    services
        .subtitle(item)
        .render_subtitle(out, &DisplayOptions::new(before, after))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use sottotitolo_sdk::types::ContentItem;

    use crate::config::Config;

    #[test]
    fn helpers_match_accessor_output() {
        let (services, store) = SubtitleServices::in_memory(&Config::default()).unwrap();
        let item = ContentItem::new(4, "page");
        store.insert_item(item.clone());
        services.subtitle(&item).update_subtitle("About us");

        assert_eq!(
            get_the_subtitle(&services, &item, "<p>", "</p>"),
            "<p>About us</p>"
        );

        let mut out = Vec::new();
        the_subtitle(&services, 4i64, "", "", &mut out).unwrap();
        assert_eq!(out, b"About us");
    }

    #[test]
    fn helpers_are_empty_for_zero_id() {
        let (services, _) = SubtitleServices::in_memory(&Config::default()).unwrap();
        assert_eq!(get_the_subtitle(&services, 0i64, "<p>", "</p>"), "");
    }
}
