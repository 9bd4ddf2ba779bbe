//! Raw per-node records supplied by the page annotator.
//!
//! A record carries only the shallow metadata of one heading or comment: its
//! kind, id, nesting level and the ids of its direct replies. Records are
//! usually read back from a page metadata cache, which may have been written by
//! an older annotator, so everything beyond those four fields is optional and
//! the older key names are still accepted.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Discriminates headings from comments in a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A section heading, the root of one thread
    Heading,
    /// A discussion comment
    Comment,
}

/// One annotated node as produced by the page annotator.
///
/// `type` and `replies` are accepted as the older names of `kind` and
/// `reply_ids`. A record must use one name per field: carrying both `kind`
/// and `type` (or both `reply_ids` and `replies`) is a duplicate field, and
/// [`parse_records`] rejects the whole document with [`Error::Json`].
///
/// [`Error::Json`]: crate::error::Error::Json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawThreadItem {
    /// Heading or comment
    #[serde(alias = "type")]
    pub kind: ItemKind,
    /// Id unique within one page snapshot
    pub id: String,
    /// Nesting depth, carried through without interpretation (headings are
    /// always reconstructed at level 0)
    #[serde(default)]
    pub level: u32,
    /// Ids of the direct replies, in document order
    #[serde(default, alias = "replies")]
    pub reply_ids: Vec<String>,
    /// Comment author, when the annotator recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Comment timestamp as written by the annotator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Markup heading level (2 for `==`, 3 for `===`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    /// Synthetic heading standing in for content above the first real heading
    #[serde(default, skip_serializing_if = "is_false")]
    pub placeholder_heading: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl RawThreadItem {
    /// Create a heading record at the top level.
    pub fn heading(id: impl Into<String>) -> Self {
        Self::new(ItemKind::Heading, id, 0)
    }

    /// Create a comment record at the given nesting level.
    pub fn comment(id: impl Into<String>, level: u32) -> Self {
        Self::new(ItemKind::Comment, id, level)
    }

    fn new(kind: ItemKind, id: impl Into<String>, level: u32) -> Self {
        Self {
            kind,
            id: id.into(),
            level,
            reply_ids: Vec::new(),
            author: None,
            timestamp: None,
            heading_level: None,
            placeholder_heading: false,
        }
    }

    /// Set the ids of the direct replies.
    pub fn with_replies(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.reply_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set the markup heading level.
    pub fn with_heading_level(mut self, heading_level: u8) -> Self {
        self.heading_level = Some(heading_level);
        self
    }

    /// Mark this heading as a placeholder.
    pub fn placeholder(mut self) -> Self {
        self.placeholder_heading = true;
        self
    }
}

/// Decode a JSON array of records, as stored in a page metadata cache.
///
/// # Example
///
/// ```
/// use thread_items::record::{parse_records, ItemKind};
///
/// let records = parse_records(r#"[
///     {"type": "heading", "id": "h1", "level": 0, "replies": ["c1"]},
///     {"type": "comment", "id": "c1", "level": 1}
/// ]"#).unwrap();
///
/// assert_eq!(records[0].kind, ItemKind::Heading);
/// assert_eq!(records[0].reply_ids, vec!["c1"]);
/// assert!(records[1].reply_ids.is_empty());
/// ```
pub fn parse_records(json: &str) -> Result<Vec<RawThreadItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Encode records as a JSON array in the current format.
pub fn records_to_json(records: &[RawThreadItem]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
