#![forbid(unsafe_code)]

//! Core types for the bottom-sheet presentation workspace.
//!
//! This crate has no behavior of its own beyond parsing and validation. It
//! defines the vocabulary the other crates share:
//!
//! - [`SizeSpec`] / [`NamedSize`]: the abstract resting heights of a sheet.
//! - [`ContentMetrics`]: measured content and footer heights.
//! - [`SheetConfig`] / [`SheetAppearance`] / [`BlurTint`]: props.
//! - [`ViewHandle`] / [`ContentContainer`]: opaque references into the
//!   embedding layer's view tree.
//! - [`SheetError`]: the error taxonomy.

pub mod appearance;
pub mod config;
pub mod error;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod metrics;
pub mod size;
pub mod view;

pub use appearance::{BlurTint, SheetAppearance};
pub use config::SheetConfig;
pub use error::SheetError;
pub use metrics::ContentMetrics;
pub use size::{NamedSize, NativeDetents, SizeSpec, default_sizes};
pub use view::{ContentContainer, ViewHandle};
