//! Name computation for thread items.
//!
//! A name identifies an item across page revisions and caches. It is not
//! unique: callers disambiguate with the id. The reconstruction pass treats
//! the computation as a black box and calls it exactly once per item, after
//! that item's reply and parent links are resolved.

use super::types::{ItemRef, ThreadItemKind};

/// Capability that computes the name of a thread item.
///
/// The item handle can walk to the parent, the replies and every earlier
/// item, which are all linked and named by the time this is called. Replies
/// that come later in document order are linked but not yet named.
///
/// Any `FnMut(ItemRef<'_>) -> String` closure is a `NameComputer`:
///
/// ```
/// use thread_items::record::RawThreadItem;
/// use thread_items::threading::build_thread_item_set;
///
/// let records = vec![
///     RawThreadItem::heading("h1").with_replies(["c1"]),
///     RawThreadItem::comment("c1", 1),
/// ];
/// let set = build_thread_item_set(records, |item: thread_items::threading::ItemRef<'_>| {
///     format!("name-{}", item.id())
/// });
///
/// assert_eq!(set.find_comments_by_name("name-c1").len(), 1);
/// ```
pub trait NameComputer {
    /// Compute the name of `item`.
    fn compute_name(&mut self, item: ItemRef<'_>) -> String;
}

impl<F> NameComputer for F
where
    F: FnMut(ItemRef<'_>) -> String,
{
    fn compute_name(&mut self, item: ItemRef<'_>) -> String {
        self(item)
    }
}

/// Names items from their signature data.
///
/// - Comments: `c-{author}-{timestamp}`
/// - Headings: `h-{author}-{timestamp}` of the oldest comment among the
///   heading's direct replies, or `h-` when it has none
///
/// Missing authors or timestamps render as empty segments. Headings read only
/// the signature fields of their replies, never their names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamer;

impl DefaultNamer {
    /// Create a new namer.
    pub fn new() -> Self {
        Self
    }
}

impl NameComputer for DefaultNamer {
    fn compute_name(&mut self, item: ItemRef<'_>) -> String {
        match item.kind() {
            ThreadItemKind::Comment(comment) => format!(
                "c-{}-{}",
                comment.author.as_deref().unwrap_or_default(),
                comment.timestamp.as_deref().unwrap_or_default()
            ),
            ThreadItemKind::Heading(_) => {
                // Oldest by timestamp, earlier in the reply list wins ties
                let oldest = item
                    .replies()
                    .filter_map(|reply| reply.as_comment())
                    .enumerate()
                    .min_by(|(pos_a, a), (pos_b, b)| {
                        let ts_a = a.timestamp.as_deref().unwrap_or_default();
                        let ts_b = b.timestamp.as_deref().unwrap_or_default();
                        ts_a.cmp(ts_b).then(pos_a.cmp(pos_b))
                    })
                    .map(|(_, comment)| comment);

                match oldest {
                    Some(comment) => format!(
                        "h-{}-{}",
                        comment.author.as_deref().unwrap_or_default(),
                        comment.timestamp.as_deref().unwrap_or_default()
                    ),
                    None => "h-".to_string(),
                }
            }
        }
    }
}
