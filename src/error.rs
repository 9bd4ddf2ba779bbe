//! Error types for thread item reconstruction.
//!
//! Reconstruction itself is permissive and never fails. Errors only come from
//! decoding cached records and from the opt-in strict validation mode.

use thiserror::Error;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when loading or validating thread items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Cached records could not be decoded or encoded
    #[error("JSON error: {0}")]
    Json(String),

    /// Two records declared the same id
    #[error("duplicate thread item id: {0}")]
    DuplicateId(String),

    /// A record declared a reply id that no record carries
    #[error("thread item {item} declares unknown reply {reply}")]
    UnknownReply {
        /// Id of the declaring item
        item: String,
        /// The unresolved reply id
        reply: String,
    },

    /// A heading claimed as the reply of another item
    #[error("heading {0} is declared as a reply")]
    NestedHeading(String),

    /// A comment whose parent chain never reaches a heading
    #[error("comment {0} is not rooted at a heading")]
    Unrooted(String),

    /// A parent chain that loops back on itself
    #[error("reply cycle through thread item {0}")]
    Cycle(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
