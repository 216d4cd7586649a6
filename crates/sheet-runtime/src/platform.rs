#![forbid(unsafe_code)]

//! The seam between the controller and the native modal facility.
//!
//! A [`SheetPlatform`] wraps whatever actually presents the sheet (a native
//! sheet presentation controller, a bottom-sheet dialog, a test double).
//! The controller calls into it; completions and user-driven changes come
//! back through the controller's notification methods
//! (`presentation_finished`, `dismissal_finished`,
//! `selected_detent_changed`, ...), which the embedding glue invokes.
//!
//! # Contract
//!
//! - `present_sheet` / `dismiss_sheet` start an animation and return
//!   immediately. The platform later reports completion exactly once.
//! - Platform calls never re-enter the controller.

use std::time::Duration;

use sheet_core::{ContentContainer, NativeDetents, SheetAppearance, ViewHandle};
use sheet_layout::{DetentId, DetentTable};

/// Detents to install on the native sheet.
#[derive(Debug, Clone, Copy)]
pub struct DetentSelection<'a> {
    /// Every detent, in index order.
    pub table: &'a DetentTable,
    /// Identifier the sheet should rest at.
    pub selected: DetentId,
    /// Largest detent that leaves the background undimmed; `None` dims at
    /// every detent.
    pub largest_undimmed: Option<DetentId>,
}

/// Native modal facility driven by the controller.
pub trait SheetPlatform {
    /// Height available to the sheet in the presenting window.
    fn available_height(&self) -> f64;

    /// Bottom safe-area inset of the presenting window.
    fn bottom_safe_area_inset(&self) -> f64 {
        0.0
    }

    /// Named sizes the platform can present with built-in detents.
    fn native_detents(&self) -> NativeDetents {
        NativeDetents::empty()
    }

    /// Install detents and select one, optionally animating the change.
    fn apply_detents(&mut self, selection: DetentSelection<'_>, animated: bool);

    /// Apply corner radius, grabber, blur and dismiss options.
    fn apply_appearance(&mut self, appearance: &SheetAppearance);

    /// Start the presentation animation for `container`.
    fn present_sheet(&mut self, container: &ContentContainer);

    /// Start the dismissal animation.
    fn dismiss_sheet(&mut self);

    /// Move the footer's bottom edge by `offset`, animated over `duration`.
    fn animate_footer_offset(&mut self, offset: f64, duration: Duration);

    /// Resize the content container to a new width.
    fn resize_content(&mut self, container: &ContentContainer, width: f64);

    /// Pin an external scrollable view inside the content.
    fn pin_scrollable(&mut self, _container: &ContentContainer, _scrollable: ViewHandle) {}
}
