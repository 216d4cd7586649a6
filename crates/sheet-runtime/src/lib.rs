#![forbid(unsafe_code)]

//! Presentation runtime for bottom sheets.
//!
//! # Role in the workspace
//! `sheet-runtime` is the stateful layer. It owns the presentation state
//! machine, talks to the native modal facility through [`SheetPlatform`],
//! and reports lifecycle changes through [`SheetObserver`].
//!
//! # Primary responsibilities
//! - **SheetPresentationController**: present/dismiss state machine with
//!   exactly-once notifications.
//! - **SheetHostView**: prop and layout adapter that re-resolves detents
//!   when something relevant changes.
//! - **KeyboardInsetAdjuster**: footer offsets for the software keyboard.
//! - **Outcome**: deferred results of present and dismiss.
//!
//! # Threading
//! Everything here lives on the UI thread. Platform completions are fed
//! back through the controller's notification methods.

pub mod controller;
pub mod events;
pub mod host;
pub mod keyboard;
pub mod outcome;
pub mod platform;

pub use controller::{PresentationState, SheetPresentationController};
pub use events::{EventLog, SheetEvent, SheetObserver, SizeInfo};
pub use host::SheetHostView;
pub use keyboard::{InsetAnimation, KEYBOARD_ANIMATION, KeyboardInsetAdjuster};
pub use outcome::Outcome;
pub use platform::{DetentSelection, SheetPlatform};
