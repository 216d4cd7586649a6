#![forbid(unsafe_code)]

//! Detent layout for bottom sheets.
//!
//! - [`SizeResolver`] turns [`SizeSpec`](sheet_core::SizeSpec)s plus
//!   measured [`ContentMetrics`](sheet_core::ContentMetrics) into a
//!   [`DetentTable`].
//! - [`DetentTable`] indexes the resolved detents by position and by
//!   per-pass [`DetentId`].
//! - [`ContentLayoutObserver`] filters layout passes down to real height
//!   changes.

pub mod detent;
pub mod observer;
pub mod resolver;

pub use detent::{DetentId, DetentTable, MAX_DETENTS, ResolvedDetent};
pub use observer::ContentLayoutObserver;
pub use resolver::{
    AUTO_FALLBACK_FRACTION, MIN_DETENT_HEIGHT, SizeResolver, TruncationPolicy,
};
