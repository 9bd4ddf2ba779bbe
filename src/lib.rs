//! # thread-items
//!
//! Reconstructs the headings and comments of a discussion page into
//! navigable reply trees.
//!
//! The page annotator hands over a flat, document-ordered list of records,
//! each carrying only a kind, an id, a nesting level and the ids of its
//! direct replies. This crate links those records into one tree per heading
//! and indexes every item by name (for matching comments across revisions
//! and caches) and by id (for exact identification).
//!
//! ## Design Philosophy
//!
//! - **Arena ownership**: one [`ThreadItemSet`] owns every item; parent and
//!   reply links are indices, so malformed input cannot tangle ownership
//! - **Best effort**: records may come from caches written by older
//!   annotators, so reconstruction salvages what it can instead of failing
//! - **Injected naming**: names come from a caller-supplied
//!   [`NameComputer`](threading::NameComputer)
//!
//! ## Examples
//!
//! ```rust
//! use thread_items::record::parse_records;
//! use thread_items::threading::{build_thread_item_set, DefaultNamer};
//!
//! let records = parse_records(r#"[
//!     {"kind": "heading", "id": "h-Topic", "level": 0, "reply_ids": ["c1"]},
//!     {"kind": "comment", "id": "c1", "level": 1, "author": "Alice",
//!      "timestamp": "2024-01-01T10:00:00.000Z"}
//! ]"#).unwrap();
//!
//! let set = build_thread_item_set(records, DefaultNamer::new());
//!
//! let comment = set.find_comment_by_id("c1").unwrap();
//! assert_eq!(comment.parent().unwrap().id(), "h-Topic");
//! assert_eq!(comment.name(), "c-Alice-2024-01-01T10:00:00.000Z");
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod record;
pub mod threading;

pub use error::{Error, Result};
pub use record::{ItemKind, RawThreadItem};
pub use threading::{build_thread_item_set, ItemRef, ThreadItemSet};
