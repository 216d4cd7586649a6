#![forbid(unsafe_code)]

//! Error taxonomy shared by every sheet crate.
//!
//! # Failure Modes
//!
//! | Variant | Raised by | Surfaced |
//! |---------|-----------|----------|
//! | [`SheetError::Configuration`] | size parsing, resolution, prop setters | synchronously |
//! | [`SheetError::InvalidSizeIndex`] | `present(index)` | through the deferred outcome |
//! | [`SheetError::NoHostAvailable`] | `present(index)` before attach / after detach | through the deferred outcome |
//! | [`SheetError::ContentAlreadyAttached`] | a second `attach` | synchronously |
//! | [`SheetError::Cancelled`] | controller dropped with work in flight | through the deferred outcome |
//!
//! None of these are fatal: a failed call leaves the presentation state
//! untouched and nothing is retried automatically.

/// Errors produced by the sheet presentation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SheetError {
    /// A size list, size token, or numeric prop is unusable.
    #[error("invalid sheet configuration: {0}")]
    Configuration(String),
    /// `present` was asked for a size the current detent table does not have.
    #[error("size at index {index} is not configured ({len} sizes available)")]
    InvalidSizeIndex {
        /// The requested index.
        index: usize,
        /// Number of detents in the current table.
        len: usize,
    },
    /// No content container is attached.
    #[error("no content container is attached to the sheet")]
    NoHostAvailable,
    /// `attach` was called twice without a `detach` in between.
    #[error("sheet can only have one content container")]
    ContentAlreadyAttached,
    /// The controller went away before a pending operation completed.
    #[error("sheet operation was cancelled before it completed")]
    Cancelled,
}

impl SheetError {
    /// Shorthand for building a [`SheetError::Configuration`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
