//! Reconstruction pass.
//!
//! This module turns the flat list of records produced by the page annotator
//! into a linked and indexed [`ThreadItemSet`].

use std::collections::HashMap;

use crate::record::{ItemKind, RawThreadItem};

use super::name::NameComputer;
use super::set::ThreadItemSet;
use super::types::{CommentItem, HeadingItem, ItemIndex, ItemRef, ThreadItem, ThreadItemKind};

/// Build a thread item set from annotated records.
///
/// Reply targets may be declared before the record they point at, so this
/// runs in two passes:
///
/// 1. Instantiate every record as a heading or comment, in input order, and
///    append it to the set's views.
/// 2. In the same order, for each item: resolve its reply ids, point each
///    reply's parent back at it, compute its name, and register it in the
///    name and id indices.
///
/// The pass never fails. Reply ids that match no record are dropped, a reply
/// id listed twice by the same item is linked once, and duplicate ids let the
/// later record win in the id lookup. When two items both claim the same
/// reply, the later one becomes its parent. Empty input gives an empty set.
///
/// `namer` is called exactly once per item.
pub fn build_thread_item_set<N>(records: Vec<RawThreadItem>, mut namer: N) -> ThreadItemSet
where
    N: NameComputer,
{
    let record_count = records.len();
    let mut set = ThreadItemSet::with_capacity(record_count);

    // Temporary lookups for the second pass
    let mut id_to_index: HashMap<String, ItemIndex> = HashMap::with_capacity(record_count);
    let mut declared_replies: Vec<Vec<String>> = Vec::with_capacity(record_count);

    // Pass 1: instantiate
    for record in records {
        let RawThreadItem {
            kind,
            id,
            level,
            reply_ids,
            author,
            timestamp,
            heading_level,
            placeholder_heading,
        } = record;

        // Headings always sit at the top level, whatever the record says
        let (level, kind) = match kind {
            ItemKind::Heading => (
                0,
                ThreadItemKind::Heading(HeadingItem {
                    heading_level,
                    placeholder: placeholder_heading,
                }),
            ),
            ItemKind::Comment => (
                level,
                ThreadItemKind::Comment(CommentItem { author, timestamp }),
            ),
        };

        let index = set.push(ThreadItem::new(id.clone(), level, kind));
        id_to_index.insert(id, index);
        declared_replies.push(reply_ids);
    }

    // Pass 2: link and name
    let mut unresolved = 0usize;
    for (position, reply_ids) in declared_replies.into_iter().enumerate() {
        let index = ItemIndex(position);

        let mut replies: Vec<ItemIndex> = Vec::with_capacity(reply_ids.len());
        for reply_id in &reply_ids {
            match id_to_index.get(reply_id) {
                Some(&reply) if !replies.contains(&reply) => replies.push(reply),
                Some(_) => {}
                None => {
                    unresolved += 1;
                    log::warn!(
                        "thread item {} declares reply {} which is not on the page",
                        set.items()[position].id(),
                        reply_id
                    );
                }
            }
        }

        let items = set.items_mut();
        for &reply in &replies {
            items[reply.0].parent = Some(index);
        }
        items[position].replies = replies;

        let name = namer.compute_name(ItemRef::new(set.items(), index));
        log::trace!("named thread item {} as {}", set.items()[position].id(), name);
        set.items_mut()[position].name = name;

        if let Some(previous) = set.register(index) {
            log::warn!(
                "duplicate thread item id {} at positions {} and {}",
                set.items()[position].id(),
                previous.get(),
                position
            );
        }
    }

    log::debug!(
        "reconstructed {} thread items ({} threads, {} comments, {} unresolved replies)",
        set.len(),
        set.threads().count(),
        set.comment_items().count(),
        unresolved
    );

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threading::name::DefaultNamer;

    fn id_namer(item: ItemRef<'_>) -> String {
        format!("n-{}", item.id())
    }

    fn ids<'a>(items: impl Iterator<Item = ItemRef<'a>>) -> Vec<&'a str> {
        items.map(|item| item.id()).collect()
    }

    #[test]
    fn test_empty_input() {
        let set = build_thread_item_set(Vec::new(), id_namer);
        assert!(set.is_empty());
        assert_eq!(set.threads().count(), 0);
    }

    #[test]
    fn test_heading_with_one_reply() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1"]),
            RawThreadItem::comment("c1", 1),
        ];
        let set = build_thread_item_set(records, id_namer);

        let h1 = set.threads().next().unwrap();
        let c1 = set.find_comment_by_id("c1").unwrap();

        assert_eq!(ids(set.threads()), vec!["h1"]);
        assert_eq!(ids(h1.replies()), vec!["c1"]);
        assert_eq!(c1.parent(), Some(h1));
        assert_eq!(ids(set.comment_items()), vec!["c1"]);
        assert_eq!(c1.name(), "n-c1");
    }

    #[test]
    fn test_reply_declared_before_target_exists() {
        // c2 replies to c1, and c1 is declared after its reply
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1"]),
            RawThreadItem::comment("c2", 2),
            RawThreadItem::comment("c1", 1).with_replies(["c2"]),
        ];
        let set = build_thread_item_set(records, id_namer);

        let c2 = set.find_comment_by_id("c2").unwrap();
        assert_eq!(c2.parent().map(|p| p.id()), Some("c1"));
        assert_eq!(c2.root().map(|r| r.id()), Some("h1"));
        assert_eq!(ids(set.thread_items()), vec!["h1", "c2", "c1"]);
    }

    #[test]
    fn test_unknown_reply_is_dropped() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1", "ghost"]),
            RawThreadItem::comment("c1", 1),
        ];
        let set = build_thread_item_set(records, id_namer);

        let h1 = set.find_comment_by_id("h1").unwrap();
        assert_eq!(ids(h1.replies()), vec!["c1"]);
        assert!(set.find_comment_by_id("ghost").is_none());
    }

    #[test]
    fn test_repeated_reply_id_linked_once() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1", "c1"]),
            RawThreadItem::comment("c1", 1),
        ];
        let set = build_thread_item_set(records, id_namer);

        assert_eq!(set.find_comment_by_id("h1").unwrap().reply_count(), 1);
    }

    #[test]
    fn test_conflicting_parents_last_writer_wins() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1", "c2"]),
            RawThreadItem::comment("c1", 1).with_replies(["c2"]),
            RawThreadItem::comment("c2", 2),
        ];
        let set = build_thread_item_set(records, id_namer);

        let c2 = set.find_comment_by_id("c2").unwrap();
        assert_eq!(c2.parent().map(|p| p.id()), Some("c1"));
    }

    #[test]
    fn test_duplicate_ids_last_registration_wins() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["dup"]),
            RawThreadItem::comment("dup", 1).with_author("First"),
            RawThreadItem::comment("dup", 1).with_author("Second"),
        ];
        let set = build_thread_item_set(records, DefaultNamer::new());

        assert_eq!(set.len(), 3);
        assert_eq!(set.comment_items().count(), 2);
        let found = set.find_comment_by_id("dup").unwrap();
        assert_eq!(found.index().get(), 2);
        assert_eq!(found.as_comment().unwrap().author.as_deref(), Some("Second"));
    }

    #[test]
    fn test_namer_called_once_per_item_in_input_order() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1"]),
            RawThreadItem::comment("c1", 1).with_replies(["c2"]),
            RawThreadItem::comment("c2", 2),
            RawThreadItem::heading("h2"),
        ];
        let mut seen: Vec<String> = Vec::new();
        let set = build_thread_item_set(records, |item: ItemRef<'_>| {
            seen.push(item.id().to_string());
            String::from("x")
        });

        assert_eq!(seen, vec!["h1", "c1", "c2", "h2"]);
        assert_eq!(set.find_comments_by_name("x").len(), 4);
    }

    #[test]
    fn test_namer_sees_links_and_earlier_names() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1"]),
            RawThreadItem::comment("c1", 1).with_replies(["c2"]),
            RawThreadItem::comment("c2", 2),
        ];
        let set = build_thread_item_set(records, |item: ItemRef<'_>| match item.parent() {
            Some(parent) => format!("{}/{}", parent.name(), item.id()),
            None => format!("{}+{}", item.id(), item.reply_count()),
        });

        assert_eq!(set.find_comment_by_id("h1").unwrap().name(), "h1+1");
        assert_eq!(set.find_comment_by_id("c2").unwrap().name(), "h1+1/c1/c2");
    }

    #[test]
    fn test_level_is_carried_through() {
        let records = vec![
            RawThreadItem::heading("h1").with_replies(["c1"]),
            RawThreadItem::comment("c1", 7),
        ];
        let set = build_thread_item_set(records, id_namer);

        assert_eq!(set.find_comment_by_id("h1").unwrap().level(), 0);
        assert_eq!(set.find_comment_by_id("c1").unwrap().level(), 7);
    }

    #[test]
    fn test_cached_heading_level_forced_to_top() {
        let records = crate::record::parse_records(
            r#"[
                {"kind": "heading", "id": "h1", "level": 3, "reply_ids": ["c1"]},
                {"kind": "comment", "id": "c1", "level": 4}
            ]"#,
        )
        .unwrap();
        let set = build_thread_item_set(records, DefaultNamer::new());

        assert_eq!(set.find_comment_by_id("h1").unwrap().level(), 0);
        assert_eq!(set.find_comment_by_id("c1").unwrap().level(), 4);
        assert_eq!(set.to_records()[0].level, 0);
    }
}
