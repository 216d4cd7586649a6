#![forbid(unsafe_code)]

//! Prop-driven adapter between the embedding layer and the controller.
//!
//! [`SheetHostView`] is what a declarative wrapper talks to. It keeps the
//! current [`SheetConfig`], tracks measured layout through a
//! [`ContentLayoutObserver`], and turns prop or layout changes into
//! re-resolved detent tables for its [`SheetPresentationController`].
//!
//! # Invariants
//!
//! 1. Every setter is idempotent: setting the current value does nothing.
//! 2. A reconfiguration pass runs only while the sheet is presenting or
//!    presented, and only when a value that feeds resolution changed.
//! 3. Content measurements do not survive a dismissal.
//!
//! # Failure Modes
//!
//! Setters that feed resolution validate their input and return
//! [`SheetError::Configuration`] without touching the stored props.

use sheet_core::{
    BlurTint, ContentContainer, ContentMetrics, SheetConfig, SheetError, SizeSpec, ViewHandle,
};
use sheet_layout::{ContentLayoutObserver, DetentId, DetentTable, SizeResolver, TruncationPolicy};

use crate::controller::{PresentationState, SheetPresentationController};
use crate::events::SheetObserver;
use crate::outcome::Outcome;
use crate::platform::SheetPlatform;

/// Host view for one sheet.
#[derive(Debug)]
pub struct SheetHostView<P> {
    controller: SheetPresentationController<P>,
    config: SheetConfig,
    layout: ContentLayoutObserver,
    policy: TruncationPolicy,
    reconfigurations: u64,
}

impl<P: SheetPlatform> SheetHostView<P> {
    /// Create a host with default props.
    pub fn new(platform: P, observer: impl SheetObserver + 'static) -> Self {
        let config = SheetConfig::default();
        let mut controller = SheetPresentationController::new(platform, observer);
        controller.set_appearance(config.appearance());

        let mut layout = ContentLayoutObserver::new();
        layout.set_max_height(config.max_height);

        Self {
            controller,
            config,
            layout,
            policy: TruncationPolicy::default(),
            reconfigurations: 0,
        }
    }

    /// Create a host with the given props.
    ///
    /// # Errors
    ///
    /// See [`SheetHostView::apply_props`].
    pub fn with_config(
        platform: P,
        observer: impl SheetObserver + 'static,
        config: SheetConfig,
    ) -> Result<Self, SheetError> {
        let mut host = Self::new(platform, observer);
        host.apply_props(config)?;
        Ok(host)
    }

    /// Set how size lists longer than three entries are handled.
    #[must_use]
    pub fn truncation_policy(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    // --- Queries ---

    /// The controller driving the platform.
    #[inline]
    pub fn controller(&self) -> &SheetPresentationController<P> {
        &self.controller
    }

    /// Mutable access to the controller.
    #[inline]
    pub fn controller_mut(&mut self) -> &mut SheetPresentationController<P> {
        &mut self.controller
    }

    /// Current props.
    #[inline]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Current layout measurements.
    #[inline]
    pub fn metrics(&self) -> &ContentMetrics {
        self.layout.metrics()
    }

    /// Shortcut for `controller().state()`.
    #[inline]
    pub fn state(&self) -> PresentationState {
        self.controller.state()
    }

    /// Number of detent tables resolved and handed to the controller.
    #[inline]
    pub fn reconfiguration_count(&self) -> u64 {
        self.reconfigurations
    }

    // --- Children ---

    /// Attach the content container.
    ///
    /// # Errors
    ///
    /// [`SheetError::ContentAlreadyAttached`] on a second attach.
    pub fn attach(&mut self, container: ContentContainer) -> Result<(), SheetError> {
        self.controller.attach(container)
    }

    /// Detach the content container, dismissing the sheet if it is up.
    pub fn detach(&mut self) -> Option<ContentContainer> {
        self.controller.detach()
    }

    // --- Props ---

    /// Set the resting sizes.
    ///
    /// # Errors
    ///
    /// [`SheetError::Configuration`] if the list is empty, holds an invalid
    /// spec, or is too long under [`TruncationPolicy::Reject`].
    pub fn set_sizes(&mut self, sizes: Vec<SizeSpec>) -> Result<(), SheetError> {
        if sizes == self.config.sizes {
            return Ok(());
        }
        self.resolver().validate(&sizes)?;
        let table = self.resolve_if_visible(&sizes, self.layout.metrics())?;
        self.config.sizes = sizes;
        self.install(table);
        Ok(())
    }

    /// Set the max-height cap.
    ///
    /// # Errors
    ///
    /// [`SheetError::Configuration`] for a non-positive or non-finite cap.
    pub fn set_max_height(&mut self, max_height: Option<f64>) -> Result<(), SheetError> {
        if let Some(max) = max_height
            && (!max.is_finite() || max <= 0.0)
        {
            return Err(SheetError::config(format!(
                "max height must be a positive number, got {max}"
            )));
        }
        let mut layout = self.layout.clone();
        let table = if layout.set_max_height(max_height) {
            self.resolve_if_visible(&self.config.sizes, layout.metrics())?
        } else {
            None
        };
        self.config.max_height = max_height;
        self.layout = layout;
        self.install(table);
        Ok(())
    }

    /// Set the corner radius; `None` restores the platform default.
    ///
    /// # Errors
    ///
    /// [`SheetError::Configuration`] for a negative or non-finite radius.
    pub fn set_corner_radius(&mut self, radius: Option<f64>) -> Result<(), SheetError> {
        if let Some(r) = radius
            && (!r.is_finite() || r < 0.0)
        {
            return Err(SheetError::config(format!(
                "corner radius must be a non-negative number, got {r}"
            )));
        }
        self.config.corner_radius = radius;
        self.sync_appearance();
        Ok(())
    }

    pub fn set_dimmed(&mut self, dimmed: bool) {
        self.config.dimmed = dimmed;
        self.sync_appearance();
    }

    pub fn set_dimmed_index(&mut self, index: usize) {
        self.config.dimmed_index = index;
        self.sync_appearance();
    }

    pub fn set_grabber(&mut self, visible: bool) {
        self.config.grabber = visible;
        self.sync_appearance();
    }

    pub fn set_blur_tint(&mut self, tint: Option<BlurTint>) {
        self.config.blur_tint = tint;
        self.sync_appearance();
    }

    pub fn set_dismissible(&mut self, dismissible: bool) {
        self.config.dismissible = dismissible;
        self.sync_appearance();
    }

    pub fn set_scrollable_handle(&mut self, handle: Option<ViewHandle>) {
        self.config.scrollable_handle = handle;
        self.sync_appearance();
    }

    /// Replace every prop at once.
    ///
    /// # Errors
    ///
    /// [`SheetError::Configuration`] if any prop is invalid or the new
    /// sizes cannot be resolved; nothing is applied in that case.
    pub fn apply_props(&mut self, config: SheetConfig) -> Result<(), SheetError> {
        config.validate()?;
        self.resolver().validate(&config.sizes)?;

        let mut layout = self.layout.clone();
        let max_changed = layout.set_max_height(config.max_height);
        let table = if max_changed || config.sizes != self.config.sizes {
            self.resolve_if_visible(&config.sizes, layout.metrics())?
        } else {
            None
        };

        self.layout = layout;
        self.config = config;
        self.sync_appearance();
        self.install(table);
        Ok(())
    }

    // --- Layout ---

    /// The content view was laid out at `height`.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures.
    pub fn content_layout_changed(&mut self, height: f64) -> Result<(), SheetError> {
        let inset = self.controller.platform().bottom_safe_area_inset();
        self.layout.set_bottom_inset(inset);
        if self.layout.content_laid_out(height) {
            self.reconfigure_if_visible()?;
        }
        Ok(())
    }

    /// The footer view was laid out at `height`.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures.
    pub fn footer_layout_changed(
        &mut self,
        height: f64,
        has_children: bool,
    ) -> Result<(), SheetError> {
        if self.layout.footer_laid_out(height, has_children) {
            self.reconfigure_if_visible()?;
        }
        Ok(())
    }

    // --- Presentation ---

    /// Present at `index`.
    ///
    /// A dismissed sheet resolves its sizes against the current
    /// measurements first.
    pub fn present(&mut self, index: usize) -> Outcome {
        if !self.controller.state().is_visible()
            && let Err(err) = self.reconfigure(false)
        {
            return Outcome::ready(Err(err));
        }
        self.controller.present(index)
    }

    /// Dismiss the sheet.
    pub fn dismiss(&mut self) -> Outcome {
        self.controller.dismiss()
    }

    // --- Platform Notifications ---

    pub fn presentation_finished(&mut self) {
        self.controller.presentation_finished();
    }

    /// The sheet left the screen, programmatically or by drag.
    pub fn dismissal_finished(&mut self) {
        let before = self.controller.state();
        self.controller.dismissal_finished();
        if before != PresentationState::Dismissed && self.controller.state() != before {
            tracing::debug!("layout metrics cleared after dismissal");
            self.layout.reset();
            self.layout.set_max_height(self.config.max_height);
        }
    }

    pub fn selected_detent_changed(&mut self, id: DetentId) {
        self.controller.selected_detent_changed(id);
    }

    pub fn container_width_changed(&mut self, width: f64) {
        self.controller.container_width_changed(width);
    }

    pub fn keyboard_will_show(&mut self, keyboard_height: f64) {
        self.controller.keyboard_will_show(keyboard_height);
    }

    pub fn keyboard_will_hide(&mut self) {
        self.controller.keyboard_will_hide();
    }

    pub fn will_appear(&mut self) {
        self.controller.will_appear();
    }

    pub fn should_dismiss_interactively(&self) -> bool {
        self.controller.should_dismiss_interactively()
    }

    // --- Internals ---

    fn resolver(&self) -> SizeResolver {
        SizeResolver::new()
            .policy(self.policy)
            .native_detents(self.controller.platform().native_detents())
    }

    fn resolve(
        &self,
        sizes: &[SizeSpec],
        metrics: &ContentMetrics,
    ) -> Result<DetentTable, SheetError> {
        let available = self.controller.platform().available_height();
        self.resolver().resolve(sizes, metrics, available)
    }

    /// Resolve only when the result would be pushed to a visible sheet.
    fn resolve_if_visible(
        &self,
        sizes: &[SizeSpec],
        metrics: &ContentMetrics,
    ) -> Result<Option<DetentTable>, SheetError> {
        if self.controller.state().is_visible() {
            self.resolve(sizes, metrics).map(Some)
        } else {
            Ok(None)
        }
    }

    fn install(&mut self, table: Option<DetentTable>) {
        if let Some(table) = table {
            self.reconfigurations += 1;
            self.controller.configure(table, true);
        }
    }

    fn reconfigure(&mut self, animated: bool) -> Result<(), SheetError> {
        let table = self.resolve(&self.config.sizes, self.layout.metrics())?;
        self.reconfigurations += 1;
        self.controller.configure(table, animated);
        Ok(())
    }

    fn reconfigure_if_visible(&mut self) -> Result<(), SheetError> {
        let table = self.resolve_if_visible(&self.config.sizes, self.layout.metrics())?;
        self.install(table);
        Ok(())
    }

    fn sync_appearance(&mut self) {
        self.controller.set_appearance(self.config.appearance());
    }
}
