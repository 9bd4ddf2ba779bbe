//! Core types for the thread item model.
//!
//! Items live in an arena owned by a [`ThreadItemSet`](super::ThreadItemSet).
//! Parent and reply links are stored as [`ItemIndex`] values into that arena,
//! so malformed input that would form cycles never affects ownership.

use std::fmt;

/// Position of an item inside the arena of one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIndex(pub(crate) usize);

impl ItemIndex {
    /// The raw arena position (equal to the item's position in input order).
    pub fn get(self) -> usize {
        self.0
    }
}

/// Variant-specific data of a section heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingItem {
    /// Markup heading level (2 for `==`, 3 for `===`, ...)
    pub heading_level: Option<u8>,
    /// Synthetic heading standing in for content above the first real heading
    pub placeholder: bool,
}

/// Variant-specific data of a discussion comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentItem {
    /// Signing author, if known
    pub author: Option<String>,
    /// Signature timestamp, if known
    pub timestamp: Option<String>,
}

/// Heading or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadItemKind {
    /// A section heading; the root of one thread
    Heading(HeadingItem),
    /// A comment; rooted at a heading through its parent chain
    Comment(CommentItem),
}

/// One heading or comment extracted from a discussion page.
///
/// `parent` and `replies` are only written by the reconstruction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadItem {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) level: u32,
    pub(crate) parent: Option<ItemIndex>,
    pub(crate) replies: Vec<ItemIndex>,
    pub(crate) kind: ThreadItemKind,
}

impl ThreadItem {
    pub(crate) fn new(id: String, level: u32, kind: ThreadItemKind) -> Self {
        Self {
            id,
            name: String::new(),
            level,
            parent: None,
            replies: Vec::new(),
            kind,
        }
    }

    /// The caller-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The computed name (empty until the item has been named).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The nesting level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Heading or comment data.
    pub fn kind(&self) -> &ThreadItemKind {
        &self.kind
    }

    /// Arena index of the parent, if linked.
    pub fn parent_index(&self) -> Option<ItemIndex> {
        self.parent
    }

    /// Arena indices of the direct replies, in declared order.
    pub fn reply_indices(&self) -> &[ItemIndex] {
        &self.replies
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, ThreadItemKind::Heading(_))
    }

    /// Check if this is a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, ThreadItemKind::Comment(_))
    }
}

/// A borrowed view of one item together with the arena it lives in.
///
/// This is what queries hand out: it can walk to the parent and replies
/// without the caller juggling indices. Two `ItemRef`s compare equal when they
/// point at the same item of the same arena.
#[derive(Clone, Copy)]
pub struct ItemRef<'a> {
    items: &'a [ThreadItem],
    index: ItemIndex,
}

impl<'a> ItemRef<'a> {
    pub(crate) fn new(items: &'a [ThreadItem], index: ItemIndex) -> Self {
        Self { items, index }
    }

    fn at(&self, index: ItemIndex) -> Option<ItemRef<'a>> {
        (index.0 < self.items.len()).then(|| ItemRef::new(self.items, index))
    }

    /// The underlying item.
    pub fn item(&self) -> &'a ThreadItem {
        &self.items[self.index.0]
    }

    /// Arena index of this item.
    pub fn index(&self) -> ItemIndex {
        self.index
    }

    /// The caller-assigned id.
    pub fn id(&self) -> &'a str {
        &self.item().id
    }

    /// The computed name.
    pub fn name(&self) -> &'a str {
        &self.item().name
    }

    /// The nesting level.
    pub fn level(&self) -> u32 {
        self.item().level
    }

    /// Heading or comment data.
    pub fn kind(&self) -> &'a ThreadItemKind {
        &self.item().kind
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.item().is_heading()
    }

    /// Check if this is a comment.
    pub fn is_comment(&self) -> bool {
        self.item().is_comment()
    }

    /// Heading data, if this is a heading.
    pub fn as_heading(&self) -> Option<&'a HeadingItem> {
        match self.kind() {
            ThreadItemKind::Heading(heading) => Some(heading),
            ThreadItemKind::Comment(_) => None,
        }
    }

    /// Comment data, if this is a comment.
    pub fn as_comment(&self) -> Option<&'a CommentItem> {
        match self.kind() {
            ThreadItemKind::Heading(_) => None,
            ThreadItemKind::Comment(comment) => Some(comment),
        }
    }

    /// The item that declared this one as a reply.
    pub fn parent(&self) -> Option<ItemRef<'a>> {
        self.item().parent.and_then(|index| self.at(index))
    }

    /// Direct replies, in declared order.
    pub fn replies(&self) -> impl Iterator<Item = ItemRef<'a>> + 'a {
        let items = self.items;
        self.item()
            .replies
            .iter()
            .map(move |&index| ItemRef::new(items, index))
    }

    /// Number of direct replies.
    pub fn reply_count(&self) -> usize {
        self.item().replies.len()
    }

    /// Check if this item has any replies.
    pub fn has_replies(&self) -> bool {
        !self.item().replies.is_empty()
    }

    /// Walk the parent chain, nearest ancestor first.
    ///
    /// Stops after visiting as many items as the arena holds, so a looping
    /// chain from malformed input terminates.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
            remaining: self.items.len(),
        }
    }

    /// The heading this item belongs to: itself for a heading, otherwise the
    /// first heading on the parent chain.
    pub fn root(&self) -> Option<ItemRef<'a>> {
        if self.is_heading() {
            return Some(*self);
        }
        self.ancestors().find(|ancestor| ancestor.is_heading())
    }

    /// Iterate over this item and its subtree (depth-first, replies left to right).
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants::new(*self)
    }

    /// Depth of the subtree below this item (0 if no replies).
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(*self, 0usize)];
        let mut budget = self.items.len();
        while let Some((node, depth)) = stack.pop() {
            if budget == 0 {
                break;
            }
            budget -= 1;
            deepest = deepest.max(depth);
            for reply in node.replies() {
                stack.push((reply, depth + 1));
            }
        }
        deepest
    }
}

impl PartialEq for ItemRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.items, other.items) && self.index == other.index
    }
}

impl Eq for ItemRef<'_> {}

impl fmt::Debug for ItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRef")
            .field("index", &self.index.0)
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

/// Iterator over the parent chain of an item.
pub struct Ancestors<'a> {
    next: Option<ItemRef<'a>>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = ItemRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

/// Iterator over an item and its subtree (depth-first traversal).
pub struct Descendants<'a> {
    stack: Vec<ItemRef<'a>>,
    remaining: usize,
}

impl<'a> Descendants<'a> {
    fn new(root: ItemRef<'a>) -> Self {
        Self {
            stack: vec![root],
            remaining: root.items.len(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = ItemRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.stack.pop()?;
        // Push replies in reverse order so they're processed left-to-right
        let replies: Vec<ItemRef<'a>> = node.replies().collect();
        self.stack.extend(replies.into_iter().rev());
        Some(node)
    }
}
