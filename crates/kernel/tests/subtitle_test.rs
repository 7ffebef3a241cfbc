#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for subtitle access.
//!
//! These tests drive the accessor through in-memory services seeded by
//! `sottotitolo-test-utils`.

use sottotitolo_kernel::meta::MetaStore;
use sottotitolo_kernel::tap::{TAP_SUBTITLE, TAP_SUBTITLE_KEY};
use sottotitolo_kernel::{DEFAULT_META_KEY, SubtitleAccessor};
use sottotitolo_sdk::types::{
    ContentItem, ContentTypeDefinition, DisplayOptions, MetaUpdateResult, SUBTITLE_FEATURE,
};
use sottotitolo_test_utils::{
    ATTACHMENT_ID, BOOK_ID, EVENT_ID, PAGE_ID, POST_ID, assert, seeded_services, test_item,
};

// ============================================================================
// Identity
// ============================================================================

#[test]
fn zero_and_invalid_ids_read_empty() {
    let (services, _) = seeded_services();

    for accessor in [services.subtitle(0i64), services.subtitle(0u64)] {
        assert_eq!(accessor.item_id(), 0);
        assert_eq!(accessor.get_subtitle(&DisplayOptions::new("<b>", "</b>")), "");
        assert_eq!(accessor.get_raw_subtitle(), "");
    }
}

#[test]
fn zero_id_update_leaves_storage_untouched() {
    let (services, store) = seeded_services();

    let result = services.subtitle(0i64).update_subtitle("hello");

    assert_eq!(result, MetaUpdateResult::Unchanged);
    assert_eq!(store.meta_count(), 0);
}

#[test]
fn negative_id_resolves_to_absolute_value() {
    let (services, _) = seeded_services();
    services.subtitle(POST_ID).update_subtitle("Positive");

    let accessor = services.subtitle(-(POST_ID as i64));
    assert_eq!(accessor.item_id(), POST_ID);
    assert_eq!(accessor.get_raw_subtitle(), "Positive");
}

#[test]
fn item_and_id_construction_agree() {
    let (services, store) = seeded_services();
    let item = store_item(&store, PAGE_ID);

    services.subtitle(&item).update_subtitle("From item");

    assert_eq!(services.subtitle(PAGE_ID).get_raw_subtitle(), "From item");
    assert_eq!(
        SubtitleAccessor::new(&item, &services).get_subtitle(&DisplayOptions::default()),
        "From item"
    );
}

#[test]
fn unknown_item_is_a_no_op() {
    let (services, store) = seeded_services();
    let accessor = services.subtitle(999u64);

    assert_eq!(accessor.update_subtitle("ghost"), MetaUpdateResult::Unchanged);
    assert_eq!(accessor.get_subtitle(&DisplayOptions::default()), "");
    assert_eq!(store.meta_count(), 0);
}

// ============================================================================
// Read / write
// ============================================================================

#[test]
fn empty_storage_reads_empty() {
    let (services, _) = seeded_services();

    for id in [POST_ID, PAGE_ID, BOOK_ID] {
        let accessor = services.subtitle(id);
        assert_eq!(accessor.get_raw_subtitle(), "");
        assert_eq!(accessor.get_subtitle(&DisplayOptions::new("<p>", "</p>")), "");
    }
}

#[test]
fn update_round_trips() {
    let (services, _) = seeded_services();
    let accessor = services.subtitle(POST_ID);

    accessor.update_subtitle("hello");

    assert_eq!(accessor.get_raw_subtitle(), "hello");
}

#[test]
fn update_passes_store_result_through() {
    let (services, store) = seeded_services();
    let accessor = services.subtitle(BOOK_ID);

    let created = accessor.update_subtitle("First edition");
    assert_eq!(created.created_id(), store.meta_id(BOOK_ID, DEFAULT_META_KEY));
    assert_eq!(accessor.update_subtitle("First edition"), MetaUpdateResult::Unchanged);
    assert_eq!(accessor.update_subtitle("Second edition"), MetaUpdateResult::Updated);
}

#[test]
fn empty_update_on_missing_key_is_unchanged() {
    let (services, store) = seeded_services();

    assert_eq!(
        services.subtitle(POST_ID).update_subtitle(""),
        MetaUpdateResult::Unchanged
    );
    assert_eq!(store.meta_count(), 0);
}

#[test]
fn wrapping_applies_only_to_non_empty_values() {
    let (services, _) = seeded_services();
    let options = DisplayOptions::new("<span>", "</span>");

    assert_eq!(services.subtitle(POST_ID).get_subtitle(&options), "");

    services.subtitle(POST_ID).update_subtitle("Hi");
    assert_eq!(services.subtitle(POST_ID).get_subtitle(&options), "<span>Hi</span>");
}

#[test]
fn options_parsed_from_args() {
    let (services, _) = seeded_services();
    services.subtitle(POST_ID).update_subtitle("Hi");

    let from_query = DisplayOptions::parse("before=<em>&after=</em>&unused=1");
    let from_json = DisplayOptions::from_json(&serde_json::json!({
        "before": "<em>",
        "after": "</em>",
        "unused": 1
    }));

    assert_eq!(from_query, from_json);
    assert_eq!(services.subtitle(POST_ID).get_subtitle(&from_query), "<em>Hi</em>");
}

#[test]
fn render_writes_to_stream() {
    let (services, _) = seeded_services();
    services.subtitle(PAGE_ID).update_subtitle("Contact");

    let mut out = Vec::new();
    services
        .subtitle(PAGE_ID)
        .render_subtitle(&mut out, &DisplayOptions::new("<h2>", "</h2>"))
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "<h2>Contact</h2>");
}

// ============================================================================
// Sanitization
// ============================================================================

#[test]
fn update_strips_script_elements() {
    let (services, _) = seeded_services();
    let accessor = services.subtitle(POST_ID);

    accessor.update_subtitle("<script>x</script>hello");

    let stored = accessor.get_raw_subtitle();
    assert::contains(&stored, "hello");
    assert::not_contains(&stored, "script");
}

#[test]
fn update_keeps_inline_markup() {
    let (services, _) = seeded_services();
    let accessor = services.subtitle(POST_ID);

    accessor.update_subtitle(r#"A <em>short</em> <a href="https://example.com" onclick="x()">story</a>"#);

    let stored = accessor.get_raw_subtitle();
    assert::contains(&stored, "<em>short</em>");
    assert::contains(&stored, r#"href="https://example.com""#);
    assert::not_contains(&stored, "onclick");
}

// ============================================================================
// Type gating
// ============================================================================

#[test]
fn unsupported_types_are_gated() {
    let (services, store) = seeded_services();

    for id in [ATTACHMENT_ID, EVENT_ID] {
        let accessor = services.subtitle(id);
        assert!(!accessor.is_supported_type());
        assert_eq!(accessor.update_subtitle("nope"), MetaUpdateResult::Unchanged);
    }
    assert_eq!(store.meta_count(), 0);
}

#[test]
fn disabling_a_type_hides_but_keeps_data() {
    let (services, store) = seeded_services();
    services.subtitle(BOOK_ID).update_subtitle("Volume one");

    assert!(services.types().remove_support("book", SUBTITLE_FEATURE));

    let accessor = services.subtitle(BOOK_ID);
    assert_eq!(accessor.get_subtitle(&DisplayOptions::default()), "");
    assert_eq!(
        store.get(BOOK_ID, DEFAULT_META_KEY).as_deref(),
        Some("Volume one")
    );

    services.types().add_support("book", SUBTITLE_FEATURE);
    assert_eq!(accessor.get_subtitle(&DisplayOptions::default()), "Volume one");
}

#[test]
fn registrations_after_construction_are_honored() {
    let (services, store) = seeded_services();
    store.insert_item(test_item(10, "recipe"));

    let accessor = services.subtitle(10u64);
    assert!(!accessor.is_supported_type());

    services
        .types()
        .register(ContentTypeDefinition::new("recipe").supports(SUBTITLE_FEATURE))
        .unwrap();

    assert!(accessor.is_supported_type());
    assert_eq!(accessor.update_subtitle("Grandma's"), MetaUpdateResult::Created(1));
}

#[test]
fn types_declaring_subtitle_support_flag_are_supported() {
    let (services, store) = seeded_services();
    store.insert_item(test_item(20, "recipe"));
    services
        .types()
        .register(ContentTypeDefinition::new("recipe").supports("subtitle-support"))
        .unwrap();

    let accessor = services.subtitle(20u64);
    assert!(accessor.is_supported_type());
    assert!(accessor.update_subtitle("Slow cooked").is_written());
    assert_eq!(
        accessor.get_subtitle(&DisplayOptions::default()),
        "Slow cooked"
    );
    assert!(accessor.supported_types().contains(&"recipe".to_string()));
}

#[test]
fn options_parsed_from_encoded_args() {
    let (services, _) = seeded_services();
    services.subtitle(POST_ID).update_subtitle("Hi");

    let options = DisplayOptions::parse("before=%3Cb%3E&after=%3C%2Fb%3E");

    assert_eq!(services.subtitle(POST_ID).get_subtitle(&options), "<b>Hi</b>");
}

#[test]
fn supported_types_list_custom_then_builtins() {
    let (services, _) = seeded_services();
    assert_eq!(
        services.subtitle(POST_ID).supported_types(),
        vec!["book", "post", "page"]
    );
}

#[test]
fn builtins_need_explicit_support() {
    let (services, _) = seeded_services();
    services.types().remove_support("page", SUBTITLE_FEATURE);

    let accessor = services.subtitle(PAGE_ID);
    assert!(!accessor.is_supported_type());
    assert!(!accessor.supported_types().contains(&"page".to_string()));
}

// ============================================================================
// Taps
// ============================================================================

#[test]
fn subtitle_tap_overrides_value() {
    let (services, _) = seeded_services();
    services.taps().on_subtitle("always_x", 0, |_, _| "X".to_string());

    let accessor = services.subtitle(POST_ID);
    assert_eq!(accessor.get_subtitle(&DisplayOptions::default()), "X");
    assert_eq!(
        accessor.get_subtitle(&DisplayOptions::new("<b>", "</b>")),
        "<b>X</b>"
    );

    accessor.update_subtitle("stored");
    assert_eq!(accessor.get_subtitle(&DisplayOptions::default()), "X");
    assert_eq!(accessor.get_raw_subtitle(), "stored");
}

#[test]
fn subtitle_tap_receives_item_context() {
    let (services, _) = seeded_services();
    services
        .taps()
        .on_subtitle("with_type", 0, |value, item: &ContentItem| {
            format!("{value} [{}]", item.item_type)
        });

    services.subtitle(BOOK_ID).update_subtitle("Chapter one");
    assert_eq!(
        services.subtitle(BOOK_ID).get_subtitle(&DisplayOptions::default()),
        "Chapter one [book]"
    );
}

#[test]
fn subtitle_tap_not_consulted_for_unsupported_items() {
    let (services, _) = seeded_services();
    services.taps().on_subtitle("always_x", 0, |_, _| "X".to_string());

    assert_eq!(
        services.subtitle(EVENT_ID).get_subtitle(&DisplayOptions::default()),
        ""
    );
}

#[test]
fn subtitle_tap_returning_empty_skips_wrapping() {
    let (services, _) = seeded_services();
    services.subtitle(POST_ID).update_subtitle("Hidden");
    services.taps().on_subtitle("hide", 0, |_, _| String::new());

    assert_eq!(
        services.subtitle(POST_ID).get_subtitle(&DisplayOptions::new("<b>", "</b>")),
        ""
    );
}

#[test]
fn key_tap_redirects_reads_and_writes() {
    let (services, store) = seeded_services();
    let accessor = services.subtitle(POST_ID);
    accessor.update_subtitle("old home");

    services
        .taps()
        .on_subtitle_key("custom", 0, |_, _| "custom_key".to_string());

    assert_eq!(accessor.get_raw_subtitle(), "");
    accessor.update_subtitle("new home");

    assert_eq!(store.get(POST_ID, "custom_key").as_deref(), Some("new home"));
    assert_eq!(store.get(POST_ID, DEFAULT_META_KEY).as_deref(), Some("old home"));
    assert_eq!(accessor.get_raw_subtitle(), "new home");
    assert_eq!(services.taps().handler_count(TAP_SUBTITLE_KEY), 1);
}

#[test]
fn key_tap_can_scope_per_item() {
    let (services, store) = seeded_services();
    services
        .taps()
        .on_subtitle_key("per_item", 0, |key, id| format!("{key}_{id}"));

    services.subtitle(PAGE_ID).update_subtitle("Scoped");

    assert_eq!(
        store.get(PAGE_ID, &format!("{DEFAULT_META_KEY}_{PAGE_ID}")).as_deref(),
        Some("Scoped")
    );
}

#[test]
fn taps_chain_in_weight_order() {
    let (services, _) = seeded_services();
    services.subtitle(POST_ID).update_subtitle("base");
    let taps = services.taps();
    taps.on_subtitle("second", 10, |v, _| format!("{v}+second"));
    taps.on_subtitle("first", -10, |v, _| format!("{v}+first"));
    taps.on_subtitle("third", 10, |v, _| format!("{v}+third"));

    assert_eq!(
        services.subtitle(POST_ID).get_subtitle(&DisplayOptions::default()),
        "base+first+second+third"
    );

    assert_eq!(taps.remove("first"), 1);
    assert_eq!(taps.handler_count(TAP_SUBTITLE), 2);
}

fn store_item(store: &sottotitolo_kernel::meta::MemoryStore, id: u64) -> ContentItem {
    use sottotitolo_kernel::meta::ItemStore;
    store.load(id).expect("seeded item")
}
