//! Reconstruction from cached page metadata.
//!
//! Cached records may predate the current annotator, carry only the four
//! structural fields, or reference comments that have since been removed.

use serde_json::json;
use thread_items::record::{parse_records, records_to_json};
use thread_items::threading::{
    build_thread_item_set, BuildOptions, DefaultNamer, ItemRef, ThreadItemSetBuilder,
};
use thread_items::Error;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn legacy_cache() -> String {
    json!([
        {"type": "heading", "id": "h-Topic", "level": 0, "replies": ["c-Alice"]},
        {"type": "comment", "id": "c-Alice", "level": 1, "replies": ["c-Bob", "c-Gone"]},
        {"type": "comment", "id": "c-Bob", "level": 2, "replies": [], "html": "<p>hi</p>"},
        {"type": "comment", "id": "c-Orphan", "level": 1}
    ])
    .to_string()
}

#[test]
fn test_legacy_cache_reconstructs() {
    init_logging();
    let records = parse_records(&legacy_cache()).unwrap();
    let set = build_thread_item_set(records, |item: ItemRef<'_>| item.id().to_lowercase());

    assert_eq!(set.len(), 4);
    let alice = set.find_comment_by_id("c-Alice").unwrap();
    let replies: Vec<&str> = alice.replies().map(|r| r.id()).collect();
    assert_eq!(replies, vec!["c-Bob"]);
    assert_eq!(set.thread_of("c-Bob").map(|h| h.id()), Some("h-Topic"));

    // Nobody claims the orphan; it is still registered but has no thread
    let orphan = set.find_comment_by_id("c-Orphan").unwrap();
    assert!(orphan.parent().is_none());
    assert!(orphan.root().is_none());
    assert_eq!(set.find_comments_by_name("c-orphan"), vec![orphan]);
}

#[test]
fn test_legacy_cache_rejected_in_strict_mode() {
    init_logging();
    let records = parse_records(&legacy_cache()).unwrap();
    let result = ThreadItemSetBuilder::with_options(BuildOptions::strict())
        .records(records)
        .try_build(DefaultNamer::new());

    assert_eq!(
        result.unwrap_err(),
        Error::UnknownReply {
            item: "c-Alice".to_string(),
            reply: "c-Gone".to_string(),
        }
    );
}

#[test]
fn test_to_records_rebuilds_same_structure() {
    init_logging();
    let records = parse_records(&legacy_cache()).unwrap();
    let original = build_thread_item_set(records, DefaultNamer::new());

    // Unresolved reply ids do not survive the trip through the cache
    let cached = records_to_json(&original.to_records()).unwrap();
    assert!(!cached.contains("c-Gone"));

    let rebuilt = build_thread_item_set(parse_records(&cached).unwrap(), DefaultNamer::new());
    assert_eq!(rebuilt.len(), original.len());
    for (a, b) in original.thread_items().zip(rebuilt.thread_items()) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.name(), b.name());
        assert_eq!(a.level(), b.level());
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.parent().map(|p| p.id()), b.parent().map(|p| p.id()));
    }

    // A clean cache now passes strict validation up to the orphan comment
    let strict = ThreadItemSetBuilder::new()
        .strict(true)
        .records(rebuilt.to_records())
        .try_build(DefaultNamer::new());
    assert_eq!(strict.unwrap_err(), Error::Unrooted("c-Orphan".to_string()));
}

#[test]
fn test_malformed_cache_is_an_error() {
    init_logging();
    let result = parse_records(r#"[{"type": "comment", "level": 1}]"#);
    assert!(matches!(result, Err(Error::Json(_))));
}
