//! Configurable entry point for the reconstruction pass.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::record::RawThreadItem;

use super::algorithm::build_thread_item_set;
use super::name::NameComputer;
use super::set::ThreadItemSet;
use super::types::ItemIndex;

/// Options controlling reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Reject malformed input in [`ThreadItemSetBuilder::try_build`] instead
    /// of reconstructing what can be salvaged.
    ///
    /// Off by default: cached records from older annotators are expected to
    /// be imperfect.
    pub strict: bool,
}

impl BuildOptions {
    /// Options that reject malformed input.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Accumulates records and reconstructs them into a [`ThreadItemSet`].
///
/// # Example
///
/// ```
/// use thread_items::record::RawThreadItem;
/// use thread_items::threading::{DefaultNamer, ThreadItemSetBuilder};
///
/// let set = ThreadItemSetBuilder::new()
///     .strict(true)
///     .record(RawThreadItem::heading("h1").with_replies(["c1"]))
///     .record(RawThreadItem::comment("c1", 1).with_author("Alice"))
///     .try_build(DefaultNamer::new())
///     .unwrap();
///
/// assert_eq!(set.threads().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThreadItemSetBuilder {
    options: BuildOptions,
    records: Vec<RawThreadItem>,
}

impl ThreadItemSetBuilder {
    /// Create a permissive builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with explicit options.
    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            options,
            records: Vec::new(),
        }
    }

    /// Turn strict validation on or off.
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Append one record.
    pub fn record(mut self, record: RawThreadItem) -> Self {
        self.records.push(record);
        self
    }

    /// Append several records, keeping their order.
    pub fn records(mut self, records: impl IntoIterator<Item = RawThreadItem>) -> Self {
        self.records.extend(records);
        self
    }

    /// The options in effect.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Number of records accumulated so far.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Reconstruct permissively, ignoring the `strict` option.
    pub fn build<N: NameComputer>(self, namer: N) -> ThreadItemSet {
        build_thread_item_set(self.records, namer)
    }

    /// Reconstruct, validating the input first when `strict` is set.
    ///
    /// Strict mode rejects duplicate ids, reply ids that match no record,
    /// headings claimed as a reply, comments whose parent chain does not
    /// reach a heading, and parent chains that loop. In permissive mode this
    /// never fails.
    pub fn try_build<N: NameComputer>(self, namer: N) -> Result<ThreadItemSet> {
        if !self.options.strict {
            return Ok(self.build(namer));
        }

        validate_records(&self.records)?;
        let set = build_thread_item_set(self.records, namer);
        validate_structure(&set)?;
        Ok(set)
    }
}

/// Check ids are unique and every reply id resolves.
fn validate_records(records: &[RawThreadItem]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(Error::DuplicateId(record.id.clone()));
        }
    }

    for record in records {
        if let Some(reply) = record.reply_ids.iter().find(|id| !seen.contains(id.as_str())) {
            return Err(Error::UnknownReply {
                item: record.id.clone(),
                reply: reply.clone(),
            });
        }
    }

    Ok(())
}

/// Check headings are roots and every comment's parent chain ends at a
/// heading without looping.
fn validate_structure(set: &ThreadItemSet) -> Result<()> {
    if let Some(heading) = set.threads().find(|heading| heading.parent().is_some()) {
        return Err(Error::NestedHeading(heading.id().to_string()));
    }

    // Items already known to reach a heading
    let mut rooted: HashMap<ItemIndex, bool> = HashMap::with_capacity(set.len());

    for comment in set.comment_items() {
        let mut chain: Vec<ItemIndex> = Vec::new();
        let mut on_chain: HashSet<ItemIndex> = HashSet::new();
        let mut current = Some(comment);

        let reaches_heading = loop {
            let Some(node) = current else {
                break false;
            };
            if node.is_heading() {
                break true;
            }
            if let Some(&known) = rooted.get(&node.index()) {
                break known;
            }
            if !on_chain.insert(node.index()) {
                return Err(Error::Cycle(node.id().to_string()));
            }
            chain.push(node.index());
            current = node.parent();
        };

        if !reaches_heading {
            return Err(Error::Unrooted(comment.id().to_string()));
        }
        rooted.extend(chain.into_iter().map(|index| (index, true)));
    }

    Ok(())
}
