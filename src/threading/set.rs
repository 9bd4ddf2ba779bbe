//! The aggregate container for one parsed page.

use std::collections::HashMap;

use crate::record::RawThreadItem;

use super::types::{ItemIndex, ItemRef, ThreadItem, ThreadItemKind};

/// All thread items of one parsed page, with their reply trees and lookups.
///
/// The set owns every item. It keeps three views in document order (all
/// items, comments only, headings only) and two indices (by name and by id).
/// It is built once by the reconstruction pass and is read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ThreadItemSet {
    /// Arena of all items, in input order
    items: Vec<ThreadItem>,
    /// Comment positions, in input order
    comments: Vec<ItemIndex>,
    /// Heading positions, in input order
    threads: Vec<ItemIndex>,
    /// Name -> items sharing it, in registration order
    by_name: HashMap<String, Vec<ItemIndex>>,
    /// Id -> item; last registration wins
    by_id: HashMap<String, ItemIndex>,
}

impl ThreadItemSet {
    /// Create an empty set with room for `capacity` items.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            comments: Vec::new(),
            threads: Vec::new(),
            by_name: HashMap::with_capacity(capacity),
            by_id: HashMap::with_capacity(capacity),
        }
    }

    /// Append an item to the arena and to the matching view.
    pub(crate) fn push(&mut self, item: ThreadItem) -> ItemIndex {
        let index = ItemIndex(self.items.len());
        match item.kind {
            ThreadItemKind::Heading(_) => self.threads.push(index),
            ThreadItemKind::Comment(_) => self.comments.push(index),
        }
        self.items.push(item);
        index
    }

    pub(crate) fn items_mut(&mut self) -> &mut [ThreadItem] {
        &mut self.items
    }

    pub(crate) fn items(&self) -> &[ThreadItem] {
        &self.items
    }

    /// Record the item's name and id in the indices.
    ///
    /// Returns the index previously registered under the same id, if any.
    pub(crate) fn register(&mut self, index: ItemIndex) -> Option<ItemIndex> {
        let item = &self.items[index.0];
        self.by_name
            .entry(item.name.clone())
            .or_default()
            .push(index);
        self.by_id.insert(item.id.clone(), index)
    }

    fn item_ref(&self, index: ItemIndex) -> ItemRef<'_> {
        ItemRef::new(&self.items, index)
    }

    /// Check if no items were registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items (headings and comments).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Get an item by arena index.
    pub fn get(&self, index: ItemIndex) -> Option<ItemRef<'_>> {
        (index.0 < self.items.len()).then(|| self.item_ref(index))
    }

    /// All items in document order, headings and comments mixed.
    ///
    /// This is input order, not tree order: a reply appears wherever the
    /// annotator found it on the page.
    pub fn thread_items(&self) -> impl Iterator<Item = ItemRef<'_>> + '_ {
        (0..self.items.len()).map(move |i| self.item_ref(ItemIndex(i)))
    }

    /// Comment items in document order.
    pub fn comment_items(&self) -> impl Iterator<Item = ItemRef<'_>> + '_ {
        self.comments.iter().map(move |&index| self.item_ref(index))
    }

    /// Headings in document order; each is the root of one thread.
    pub fn threads(&self) -> impl Iterator<Item = ItemRef<'_>> + '_ {
        self.threads.iter().map(move |&index| self.item_ref(index))
    }

    /// All items sharing `name`, in registration order.
    ///
    /// Names are not unique, so more than one item may come back. An unknown
    /// name gives an empty vector.
    pub fn find_comments_by_name(&self, name: &str) -> Vec<ItemRef<'_>> {
        self.by_name
            .get(name)
            .map(|indices| indices.iter().map(|&i| self.item_ref(i)).collect())
            .unwrap_or_default()
    }

    /// The item registered under `id`, if any.
    pub fn find_comment_by_id(&self, id: &str) -> Option<ItemRef<'_>> {
        self.by_id.get(id).map(|&index| self.item_ref(index))
    }

    /// The heading rooting the item registered under `id`.
    pub fn thread_of(&self, id: &str) -> Option<ItemRef<'_>> {
        self.find_comment_by_id(id)?.root()
    }

    /// Distinct names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_name.keys().map(|name| name.as_str())
    }

    /// Re-emit the raw records this set can be rebuilt from.
    ///
    /// Reply ids come from the resolved links, so ids that did not resolve
    /// when the set was built are gone. Useful for writing the set to a
    /// page metadata cache.
    pub fn to_records(&self) -> Vec<RawThreadItem> {
        self.items
            .iter()
            .map(|item| {
                let reply_ids = item
                    .replies
                    .iter()
                    .map(|&index| self.items[index.0].id.clone());
                let record = match &item.kind {
                    ThreadItemKind::Heading(heading) => {
                        let mut record = RawThreadItem::heading(item.id.clone());
                        record.heading_level = heading.heading_level;
                        record.placeholder_heading = heading.placeholder;
                        record
                    }
                    ThreadItemKind::Comment(comment) => {
                        let mut record = RawThreadItem::comment(item.id.clone(), item.level);
                        record.author = comment.author.clone();
                        record.timestamp = comment.timestamp.clone();
                        record
                    }
                };
                RawThreadItem {
                    level: item.level,
                    ..record.with_replies(reply_ids)
                }
            })
            .collect()
    }
}
