//! Thread reconstruction for discussion pages.
//!
//! This module assembles the headings and comments found on a discussion
//! page into reply trees, and indexes them by name and by id.
//!
//! # Overview
//!
//! - [`ThreadItemSet`] - All items of one page, with the thread views and lookups
//! - [`ItemRef`] - Borrowed handle for walking replies and parents
//! - [`ThreadItemKind`] - Heading or comment, with variant data
//! - [`NameComputer`] - Capability computing an item's name
//! - [`ThreadItemSetBuilder`] - Configurable entry point with strict validation
//!
//! # Example
//!
//! ```
//! use thread_items::record::RawThreadItem;
//! use thread_items::threading::{build_thread_item_set, DefaultNamer};
//!
//! let records = vec![
//!     RawThreadItem::heading("h1").with_replies(["c1", "c2"]),
//!     RawThreadItem::comment("c1", 1)
//!         .with_author("Alice")
//!         .with_timestamp("2024-01-01T10:00:00.000Z"),
//!     RawThreadItem::comment("c2", 1)
//!         .with_author("Bob")
//!         .with_timestamp("2024-01-01T11:00:00.000Z"),
//! ];
//!
//! let set = build_thread_item_set(records, DefaultNamer::new());
//!
//! for thread in set.threads() {
//!     println!("{}: {} replies", thread.name(), thread.reply_count());
//! }
//!
//! let alice = set.find_comments_by_name("c-Alice-2024-01-01T10:00:00.000Z");
//! assert_eq!(alice[0].id(), "c1");
//! ```

mod algorithm;
mod builder;
mod name;
mod set;
mod types;

pub use algorithm::build_thread_item_set;
pub use builder::{BuildOptions, ThreadItemSetBuilder};
pub use name::{DefaultNamer, NameComputer};
pub use set::ThreadItemSet;
pub use types::{
    Ancestors, CommentItem, Descendants, HeadingItem, ItemIndex, ItemRef, ThreadItem,
    ThreadItemKind,
};
