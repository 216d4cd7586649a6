#![forbid(unsafe_code)]

//! Presentation state machine for one bottom sheet.
//!
//! [`SheetPresentationController`] owns the detent configuration, the
//! content container, and the presentation state. It drives a
//! [`SheetPlatform`] and reports lifecycle changes to a [`SheetObserver`].
//!
//! # State Machine
//!
//! ```text
//! Dismissed ──present──▶ Presenting ──presentation_finished──▶ Presented
//!     ▲                                                            │
//!     └──dismissal_finished── Dismissing ◀──────dismiss────────────┘
//! ```
//!
//! No other transitions exist. Requests that arrive mid-animation are
//! folded into the running transition instead of starting a second one:
//!
//! | State | `present(i)` | `dismiss()` |
//! |-------|--------------|-------------|
//! | Dismissed | start presenting at `i` | resolves at once |
//! | Presenting | retarget to `i`, wait for the running presentation | queued until presented |
//! | Presented | select `i` (size change if different), resolves at once | start dismissing |
//! | Dismissing | queued until dismissed | wait for the running dismissal |
//!
//! A later request cancels a queued one of the opposite kind; the cancelled
//! caller's outcome resolves to [`SheetError::Cancelled`].
//!
//! # Invariants
//!
//! 1. Exactly one `did_present` per `Presenting → Presented` transition.
//! 2. Exactly one `did_dismiss` per return to `Dismissed` from a presented
//!    sheet, whether the dismissal was programmatic or interactive.
//! 3. `did_change_size` fires only while `Presented` and only when the
//!    active index actually changes.
//! 4. Failed requests leave the state untouched.
//!
//! # Failure Modes
//!
//! - `present` with no attached container: [`SheetError::NoHostAvailable`].
//! - `present` with an index outside the table: [`SheetError::InvalidSizeIndex`].
//! - A second `attach`: [`SheetError::ContentAlreadyAttached`].
//! - Notifications for stale detent identifiers are ignored.

use std::fmt;

use sheet_core::{ContentContainer, SheetAppearance, SheetError};
use sheet_layout::{DetentId, DetentTable, ResolvedDetent};

use crate::events::{SheetObserver, SizeInfo};
use crate::keyboard::KeyboardInsetAdjuster;
use crate::outcome::{Completer, Outcome};
use crate::platform::{DetentSelection, SheetPlatform};

/// Where the sheet is in its presentation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationState {
    /// Not on screen.
    #[default]
    Dismissed,
    /// Presentation animation running.
    Presenting,
    /// Resting at a detent.
    Presented,
    /// Dismissal animation running.
    Dismissing,
}

impl PresentationState {
    /// Whether the sheet is on screen or on its way there.
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Presenting | Self::Presented)
    }
}

/// Drives one sheet through its presentation lifecycle.
pub struct SheetPresentationController<P> {
    platform: P,
    observer: Box<dyn SheetObserver>,
    state: PresentationState,
    table: DetentTable,
    appearance: SheetAppearance,
    container: Option<ContentContainer>,
    keyboard: KeyboardInsetAdjuster,
    last_width: Option<f64>,
    presenting: Completer,
    dismissing: Completer,
    queued_present: Option<usize>,
    queued_dismiss: bool,
}

impl<P: fmt::Debug> fmt::Debug for SheetPresentationController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetPresentationController")
            .field("platform", &self.platform)
            .field("state", &self.state)
            .field("table", &self.table)
            .field("appearance", &self.appearance)
            .field("container", &self.container)
            .field("keyboard", &self.keyboard)
            .field("last_width", &self.last_width)
            .field("queued_present", &self.queued_present)
            .field("queued_dismiss", &self.queued_dismiss)
            .finish_non_exhaustive()
    }
}

impl<P: SheetPlatform> SheetPresentationController<P> {
    /// Create a dismissed controller with no detents and no container.
    pub fn new(platform: P, observer: impl SheetObserver + 'static) -> Self {
        Self {
            platform,
            observer: Box::new(observer),
            state: PresentationState::Dismissed,
            table: DetentTable::default(),
            appearance: SheetAppearance::default(),
            container: None,
            keyboard: KeyboardInsetAdjuster::new(),
            last_width: None,
            presenting: Completer::default(),
            dismissing: Completer::default(),
            queued_present: None,
            queued_dismiss: false,
        }
    }

    // --- State Queries ---

    /// Current presentation state.
    #[inline]
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// The current detent table.
    #[inline]
    pub fn table(&self) -> &DetentTable {
        &self.table
    }

    /// Index the sheet rests at, `None` while dismissed.
    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            PresentationState::Dismissed => None,
            _ => self.table.active_index(),
        }
    }

    /// Current appearance options.
    #[inline]
    pub fn appearance(&self) -> &SheetAppearance {
        &self.appearance
    }

    /// The attached content container, if any.
    #[inline]
    pub fn container(&self) -> Option<&ContentContainer> {
        self.container.as_ref()
    }

    /// The platform this controller drives.
    #[inline]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform.
    #[inline]
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Whether a present or dismiss request is waiting on the platform.
    pub fn has_pending_work(&self) -> bool {
        self.presenting.is_pending()
            || self.dismissing.is_pending()
            || self.queued_present.is_some()
            || self.queued_dismiss
    }

    // --- Container Lifecycle ---

    /// Take ownership of the content container.
    ///
    /// # Errors
    ///
    /// [`SheetError::ContentAlreadyAttached`] if a container is already
    /// attached.
    pub fn attach(&mut self, container: ContentContainer) -> Result<(), SheetError> {
        if self.container.is_some() {
            tracing::warn!("sheet can only have one content container");
            return Err(SheetError::ContentAlreadyAttached);
        }
        tracing::debug!(content = container.content.raw(), "content container attached");
        self.container = Some(container);
        Ok(())
    }

    /// Release the content container, dismissing the sheet if it is up.
    pub fn detach(&mut self) -> Option<ContentContainer> {
        if self.state.is_visible() {
            let _ = self.dismiss();
        }
        let container = self.container.take();
        if container.is_some() {
            tracing::debug!("content container detached");
        }
        container
    }

    // --- Configuration ---

    /// Install a freshly resolved detent table.
    ///
    /// The active index carries over by position when it still exists,
    /// otherwise the sheet falls back to index 0. On a presented sheet the
    /// platform is reconfigured in place; a fallback reports a size change,
    /// never a presentation.
    pub fn configure(&mut self, mut table: DetentTable, animated: bool) {
        let _span =
            tracing::debug_span!("configure_detents", detents = table.len(), animated).entered();

        if table.is_empty() {
            tracing::warn!("ignoring empty detent table");
            return;
        }

        let previous = self.table.active_index();
        table.carry_active_from(&self.table);
        self.table = table;

        if self.state.is_visible() {
            self.push_detents(animated);
        }
        if self.state == PresentationState::Presented && self.table.active_index() != previous {
            self.emit_size_change();
        }
    }

    /// Replace the appearance options.
    ///
    /// Applied to the platform right away while the sheet is visible,
    /// otherwise on the next presentation.
    pub fn set_appearance(&mut self, appearance: SheetAppearance) {
        if self.appearance == appearance {
            return;
        }
        let dimming_changed = (self.appearance.dimmed, self.appearance.dimmed_index)
            != (appearance.dimmed, appearance.dimmed_index);
        let scrollable_changed = self.appearance.scrollable != appearance.scrollable;
        self.appearance = appearance;

        if !self.state.is_visible() {
            return;
        }
        self.platform.apply_appearance(&self.appearance);
        if dimming_changed {
            self.push_detents(true);
        }
        if scrollable_changed {
            self.pin_scrollable();
        }
    }

    // --- Presentation ---

    /// Present the sheet at `index`, or move a presented sheet there.
    ///
    /// See the module docs for how each state handles the request.
    pub fn present(&mut self, index: usize) -> Outcome {
        if let Err(err) = self.check_presentable(index) {
            tracing::debug!(index, %err, "present rejected");
            return Outcome::ready(Err(err));
        }

        match self.state {
            PresentationState::Dismissed => match self.begin_presentation(index) {
                Ok(()) => self.presenting.join(),
                Err(err) => Outcome::ready(Err(err)),
            },
            PresentationState::Presenting => {
                self.cancel_queued_dismiss();
                if self.table.active_index() != Some(index) {
                    tracing::debug!(index, "retargeting running presentation");
                    self.select(index);
                }
                self.presenting.join()
            }
            PresentationState::Presented => {
                if self.table.active_index() != Some(index) {
                    self.select(index);
                    self.emit_size_change();
                }
                Outcome::ready(Ok(()))
            }
            PresentationState::Dismissing => {
                tracing::debug!(index, "present queued until dismissal completes");
                self.queued_present = Some(index);
                self.presenting.join()
            }
        }
    }

    /// Dismiss the sheet.
    ///
    /// Resolves immediately when already dismissed.
    pub fn dismiss(&mut self) -> Outcome {
        match self.state {
            PresentationState::Dismissed => Outcome::ready(Ok(())),
            PresentationState::Presented => {
                self.begin_dismissal();
                self.dismissing.join()
            }
            PresentationState::Presenting => {
                tracing::debug!("dismiss queued until presentation completes");
                self.queued_dismiss = true;
                self.dismissing.join()
            }
            PresentationState::Dismissing => {
                if self.queued_present.take().is_some() {
                    tracing::debug!("queued present cancelled by dismiss");
                    self.presenting.resolve(Err(SheetError::Cancelled));
                }
                self.dismissing.join()
            }
        }
    }

    // --- Platform Notifications ---

    /// The platform finished the presentation animation.
    pub fn presentation_finished(&mut self) {
        if self.state != PresentationState::Presenting {
            tracing::debug!(state = ?self.state, "presentation completion ignored");
            return;
        }
        self.transition(PresentationState::Presented);
        if let Some(info) = self.active_size_info() {
            self.observer.did_present(info);
        }
        self.presenting.resolve(Ok(()));

        if std::mem::take(&mut self.queued_dismiss) {
            self.begin_dismissal();
        }
    }

    /// The sheet left the screen.
    ///
    /// Reported both when a programmatic dismissal completes and when the
    /// user drags the sheet away. Repeated reports are ignored.
    pub fn dismissal_finished(&mut self) {
        let announced = match self.state {
            PresentationState::Dismissed => {
                tracing::debug!("duplicate dismissal suppressed");
                return;
            }
            PresentationState::Presenting => {
                tracing::warn!("sheet dismissed before its presentation completed");
                false
            }
            PresentationState::Presented => {
                tracing::debug!("interactive dismissal");
                true
            }
            PresentationState::Dismissing => true,
        };

        self.transition(PresentationState::Dismissed);
        self.table.clear_active();
        self.lower_footer();
        self.queued_dismiss = false;

        if announced {
            self.observer.did_dismiss();
        } else {
            self.presenting.resolve(Err(SheetError::Cancelled));
        }
        self.dismissing.resolve(Ok(()));

        if let Some(index) = self.queued_present.take()
            && let Err(err) = self.begin_presentation(index)
        {
            tracing::debug!(index, %err, "queued present failed");
            self.presenting.resolve(Err(err));
        }
    }

    /// The user (or the platform) selected a different detent.
    pub fn selected_detent_changed(&mut self, id: DetentId) {
        let Some(index) = self.table.position_of(id) else {
            tracing::debug!(%id, "ignoring change to unknown or stale detent");
            return;
        };
        if self.table.active_index() == Some(index) {
            return;
        }

        match self.state {
            PresentationState::Presented => {
                self.select_silently(index);
                self.emit_size_change();
            }
            // Recorded so the upcoming did_present carries it.
            PresentationState::Presenting => self.select_silently(index),
            state => tracing::debug!(?state, %id, "detent change ignored"),
        }
    }

    /// Whether the platform may let the user drag the sheet away.
    pub fn should_dismiss_interactively(&self) -> bool {
        self.appearance.dismissible
    }

    /// The presenting container was laid out at `width`.
    ///
    /// Forwarded once per distinct width; repeated layout passes at the same
    /// width are dropped, as are negative and non-finite widths.
    pub fn container_width_changed(&mut self, width: f64) {
        if !width.is_finite() || width < 0.0 {
            tracing::debug!(width, "ignoring invalid container width");
            return;
        }
        if self
            .last_width
            .is_some_and(|last| (last - width).abs() < f64::EPSILON)
        {
            return;
        }
        self.last_width = Some(width);
        if let Some(container) = self.container {
            self.platform.resize_content(&container, width);
        }
        self.observer.did_change_width(width);
    }

    /// The sheet's view is about to appear.
    pub fn will_appear(&mut self) {
        self.pin_scrollable();
    }

    /// The software keyboard is about to show.
    pub fn keyboard_will_show(&mut self, keyboard_height: f64) {
        if !self.keyboard_applies() {
            return;
        }
        if let Some(animation) = self.keyboard.keyboard_will_show(keyboard_height) {
            self.platform
                .animate_footer_offset(animation.offset, animation.duration);
        }
    }

    /// The software keyboard is about to hide.
    ///
    /// Unlike showing, hiding also applies while the sheet is on its way out.
    pub fn keyboard_will_hide(&mut self) {
        if self.state == PresentationState::Dismissed
            || !self.container.is_some_and(|c| c.has_footer())
        {
            tracing::debug!(state = ?self.state, "keyboard hide ignored");
            return;
        }
        if let Some(animation) = self.keyboard.keyboard_will_hide() {
            self.platform
                .animate_footer_offset(animation.offset, animation.duration);
        }
    }

    // --- Internals ---

    fn check_presentable(&self, index: usize) -> Result<(), SheetError> {
        if self.container.is_none() {
            return Err(SheetError::NoHostAvailable);
        }
        self.table.check_index(index)
    }

    fn begin_presentation(&mut self, index: usize) -> Result<(), SheetError> {
        let container = self.container.ok_or(SheetError::NoHostAvailable)?;
        self.table.set_active(Some(index))?;

        self.lower_footer();
        self.transition(PresentationState::Presenting);
        self.push_detents(false);
        self.platform.apply_appearance(&self.appearance);
        self.platform.present_sheet(&container);
        Ok(())
    }

    fn begin_dismissal(&mut self) {
        self.transition(PresentationState::Dismissing);
        self.platform.dismiss_sheet();
    }

    fn cancel_queued_dismiss(&mut self) {
        if std::mem::take(&mut self.queued_dismiss) {
            tracing::debug!("queued dismiss cancelled by present");
            self.dismissing.resolve(Err(SheetError::Cancelled));
        }
    }

    /// Make `index` active and animate the platform to it.
    fn select(&mut self, index: usize) {
        if self.table.set_active(Some(index)).is_ok() {
            self.push_detents(true);
        }
    }

    /// Record `index` as active without touching the platform.
    fn select_silently(&mut self, index: usize) {
        if let Err(err) = self.table.set_active(Some(index)) {
            tracing::debug!(index, %err, "detent selection out of range");
        }
    }

    fn push_detents(&mut self, animated: bool) {
        let Some(selected) = self.table.active().map(ResolvedDetent::id) else {
            return;
        };
        let largest_undimmed = self
            .appearance
            .largest_undimmed_index(self.table.len())
            .and_then(|index| self.table.at(index))
            .map(ResolvedDetent::id);
        self.platform.apply_detents(
            DetentSelection {
                table: &self.table,
                selected,
                largest_undimmed,
            },
            animated,
        );
    }

    fn pin_scrollable(&mut self) {
        if let (Some(container), Some(scrollable)) = (self.container, self.appearance.scrollable) {
            self.platform.pin_scrollable(&container, scrollable);
        }
    }

    /// Return a raised footer to rest on the platform side too.
    fn lower_footer(&mut self) {
        if let Some(animation) = self.keyboard.reset() {
            tracing::debug!("footer lowered after keyboard was left up");
            self.platform
                .animate_footer_offset(animation.offset, animation.duration);
        }
    }

    fn keyboard_applies(&self) -> bool {
        if self.state != PresentationState::Presented {
            tracing::debug!(state = ?self.state, "keyboard event ignored");
            return false;
        }
        self.container.is_some_and(|c| c.has_footer())
    }

    fn active_size_info(&self) -> Option<SizeInfo> {
        self.table.active().map(SizeInfo::from)
    }

    fn emit_size_change(&mut self) {
        if let Some(info) = self.active_size_info() {
            tracing::debug!(index = info.index, value = info.value, "sheet size changed");
            self.observer.did_change_size(info);
        }
    }

    fn transition(&mut self, next: PresentationState) {
        tracing::debug!(from = ?self.state, to = ?next, "sheet state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, SheetEvent};
    use sheet_core::{ContentMetrics, NamedSize, SizeSpec, ViewHandle};
    use sheet_layout::SizeResolver;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Detents { selected: usize, animated: bool },
        Appearance,
        Present,
        Dismiss,
        Footer(f64),
        Resize(f64),
        Pin(u64),
    }

    #[derive(Debug, Default)]
    struct StubPlatform {
        calls: Vec<Call>,
    }

    impl SheetPlatform for StubPlatform {
        fn available_height(&self) -> f64 {
            800.0
        }

        fn apply_detents(&mut self, selection: DetentSelection<'_>, animated: bool) {
            let selected = selection
                .table
                .position_of(selection.selected)
                .expect("selected detent belongs to the table");
            self.calls.push(Call::Detents { selected, animated });
        }

        fn apply_appearance(&mut self, _appearance: &SheetAppearance) {
            self.calls.push(Call::Appearance);
        }

        fn present_sheet(&mut self, _container: &ContentContainer) {
            self.calls.push(Call::Present);
        }

        fn dismiss_sheet(&mut self) {
            self.calls.push(Call::Dismiss);
        }

        fn animate_footer_offset(&mut self, offset: f64, _duration: Duration) {
            self.calls.push(Call::Footer(offset));
        }

        fn resize_content(&mut self, _container: &ContentContainer, width: f64) {
            self.calls.push(Call::Resize(width));
        }

        fn pin_scrollable(&mut self, _container: &ContentContainer, scrollable: ViewHandle) {
            self.calls.push(Call::Pin(scrollable.raw()));
        }
    }

    const CONTENT: ContentContainer = ContentContainer::new(ViewHandle::new(1));

    fn medium_large() -> DetentTable {
        SizeResolver::new()
            .resolve(
                &[
                    SizeSpec::Named(NamedSize::Medium),
                    SizeSpec::Named(NamedSize::Large),
                ],
                &ContentMetrics::new(),
                800.0,
            )
            .expect("valid sizes")
    }

    fn controller() -> (SheetPresentationController<StubPlatform>, EventLog) {
        let log = EventLog::new();
        let mut controller = SheetPresentationController::new(StubPlatform::default(), log.clone());
        controller.attach(CONTENT).expect("first attach");
        controller.configure(medium_large(), false);
        (controller, log)
    }

    fn presented_at(index: usize) -> (SheetPresentationController<StubPlatform>, EventLog) {
        let (mut controller, log) = controller();
        let _ = controller.present(index);
        controller.presentation_finished();
        log.take();
        controller.platform_mut().calls.clear();
        (controller, log)
    }

    #[test]
    fn starts_dismissed_and_inactive() {
        let (controller, log) = controller();
        assert_eq!(controller.state(), PresentationState::Dismissed);
        assert_eq!(controller.active_index(), None);
        assert!(log.is_empty());
        // Detents are not pushed while dismissed.
        assert!(controller.platform().calls.is_empty());
    }

    #[test]
    fn present_runs_one_animation_and_one_event() {
        let (mut controller, log) = controller();
        let mut outcome = controller.present(0);

        assert_eq!(controller.state(), PresentationState::Presenting);
        assert_eq!(outcome.try_take(), None);
        assert_eq!(
            controller.platform().calls,
            vec![
                Call::Detents {
                    selected: 0,
                    animated: false
                },
                Call::Appearance,
                Call::Present
            ]
        );

        controller.presentation_finished();
        assert_eq!(controller.state(), PresentationState::Presented);
        assert_eq!(controller.active_index(), Some(0));
        assert_eq!(outcome.try_take(), Some(Ok(())));
        assert_eq!(log.events(), vec![SheetEvent::Present(SizeInfo::new(0, 400.0))]);

        // A late duplicate completion is ignored.
        controller.presentation_finished();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn present_same_index_is_silent() {
        let (mut controller, log) = presented_at(1);
        let mut outcome = controller.present(1);
        assert_eq!(outcome.try_take(), Some(Ok(())));
        assert!(log.is_empty());
        assert!(controller.platform().calls.is_empty());
    }

    #[test]
    fn present_other_index_changes_size() {
        let (mut controller, log) = presented_at(0);
        let mut outcome = controller.present(1);
        assert_eq!(outcome.try_take(), Some(Ok(())));
        assert_eq!(log.events(), vec![SheetEvent::SizeChange(SizeInfo::new(1, 800.0))]);
        assert_eq!(
            controller.platform().calls,
            vec![Call::Detents {
                selected: 1,
                animated: true
            }]
        );
        assert_eq!(controller.state(), PresentationState::Presented);
    }

    #[test]
    fn invalid_index_leaves_state_alone() {
        let (mut controller, log) = controller();
        let mut outcome = controller.present(5);
        assert_eq!(
            outcome.try_take(),
            Some(Err(SheetError::InvalidSizeIndex { index: 5, len: 2 }))
        );
        assert_eq!(controller.state(), PresentationState::Dismissed);
        assert!(log.is_empty());
    }

    #[test]
    fn present_without_container_fails() {
        let mut controller = SheetPresentationController::new(StubPlatform::default(), EventLog::new());
        controller.configure(medium_large(), false);
        let mut outcome = controller.present(0);
        assert_eq!(outcome.try_take(), Some(Err(SheetError::NoHostAvailable)));
        assert_eq!(controller.state(), PresentationState::Dismissed);
    }

    #[test]
    fn second_attach_is_rejected() {
        let (mut controller, _log) = controller();
        assert_eq!(
            controller.attach(CONTENT),
            Err(SheetError::ContentAlreadyAttached)
        );
        assert!(controller.detach().is_some());
        assert!(controller.attach(CONTENT).is_ok());
    }

    #[test]
    fn dismiss_emits_once_and_clears_index() {
        let (mut controller, log) = presented_at(0);
        let mut outcome = controller.dismiss();
        assert_eq!(controller.state(), PresentationState::Dismissing);
        assert_eq!(outcome.try_take(), None);

        controller.dismissal_finished();
        // The platform also reports the view disappearing.
        controller.dismissal_finished();

        assert_eq!(controller.state(), PresentationState::Dismissed);
        assert_eq!(controller.active_index(), None);
        assert_eq!(outcome.try_take(), Some(Ok(())));
        assert_eq!(log.events(), vec![SheetEvent::Dismiss]);
    }

    #[test]
    fn dismiss_while_dismissed_is_a_noop() {
        let (mut controller, log) = controller();
        let mut outcome = controller.dismiss();
        assert_eq!(outcome.try_take(), Some(Ok(())));
        assert!(log.is_empty());
        assert!(controller.platform().calls.is_empty());
    }

    #[test]
    fn user_drag_dismissal_uses_same_path() {
        let (mut controller, log) = presented_at(0);
        controller.dismissal_finished();
        assert_eq!(controller.state(), PresentationState::Dismissed);
        assert_eq!(log.events(), vec![SheetEvent::Dismiss]);
        assert!(!controller.platform().calls.contains(&Call::Dismiss));
    }

    #[test]
    fn dismiss_during_presenting_is_queued() {
        let (mut controller, log) = controller();
        let mut presented = controller.present(0);
        let mut dismissed = controller.dismiss();
        assert_eq!(controller.state(), PresentationState::Presenting);
        assert!(!controller.platform().calls.contains(&Call::Dismiss));

        controller.presentation_finished();
        assert_eq!(presented.try_take(), Some(Ok(())));
        assert_eq!(controller.state(), PresentationState::Dismissing);
        assert!(controller.platform().calls.contains(&Call::Dismiss));

        controller.dismissal_finished();
        assert_eq!(dismissed.try_take(), Some(Ok(())));
        assert_eq!(
            log.events(),
            vec![
                SheetEvent::Present(SizeInfo::new(0, 400.0)),
                SheetEvent::Dismiss
            ]
        );
    }

    #[test]
    fn present_during_presenting_retargets() {
        let (mut controller, log) = controller();
        let mut first = controller.present(0);
        let mut second = controller.present(1);
        let presents = controller
            .platform()
            .calls
            .iter()
            .filter(|c| **c == Call::Present)
            .count();
        assert_eq!(presents, 1);

        controller.presentation_finished();
        assert_eq!(first.try_take(), Some(Ok(())));
        assert_eq!(second.try_take(), Some(Ok(())));
        assert_eq!(log.events(), vec![SheetEvent::Present(SizeInfo::new(1, 800.0))]);
    }

    #[test]
    fn present_cancels_queued_dismiss() {
        let (mut controller, _log) = controller();
        let _presented = controller.present(0);
        let mut dismissed = controller.dismiss();
        let _again = controller.present(0);
        assert_eq!(dismissed.try_take(), Some(Err(SheetError::Cancelled)));

        controller.presentation_finished();
        assert_eq!(controller.state(), PresentationState::Presented);
    }

    #[test]
    fn present_during_dismissing_runs_after() {
        let (mut controller, log) = presented_at(0);
        let _dismissed = controller.dismiss();
        let mut presented = controller.present(1);
        assert_eq!(presented.try_take(), None);

        controller.dismissal_finished();
        assert_eq!(controller.state(), PresentationState::Presenting);
        controller.presentation_finished();
        assert_eq!(presented.try_take(), Some(Ok(())));
        assert_eq!(
            log.events(),
            vec![
                SheetEvent::Dismiss,
                SheetEvent::Present(SizeInfo::new(1, 800.0))
            ]
        );
    }

    #[test]
    fn drag_reports_size_change_once() {
        let (mut controller, log) = presented_at(0);
        let large = controller.table().at(1).unwrap().id();
        controller.selected_detent_changed(large);
        controller.selected_detent_changed(large);
        assert_eq!(log.events(), vec![SheetEvent::SizeChange(SizeInfo::new(1, 800.0))]);
    }

    #[test]
    fn stale_detent_ids_are_ignored() {
        let (mut controller, log) = presented_at(0);
        let stale = controller.table().at(1).unwrap().id();
        controller.configure(medium_large(), true);
        controller.selected_detent_changed(stale);
        assert!(log.is_empty());
        assert_eq!(controller.active_index(), Some(0));
    }

    #[test]
    fn reconfigure_while_presented_keeps_index_without_events() {
        let (mut controller, log) = presented_at(1);
        controller.configure(medium_large(), true);
        assert_eq!(controller.active_index(), Some(1));
        assert!(log.is_empty());
        assert_eq!(
            controller.platform().calls,
            vec![Call::Detents {
                selected: 1,
                animated: true
            }]
        );
    }

    #[test]
    fn reconfigure_fallback_reports_size_change() {
        let (mut controller, log) = presented_at(1);
        let single = SizeResolver::new()
            .resolve(&[SizeSpec::Fixed(300.0)], &ContentMetrics::new(), 800.0)
            .unwrap();
        controller.configure(single, true);
        assert_eq!(controller.active_index(), Some(0));
        assert_eq!(log.events(), vec![SheetEvent::SizeChange(SizeInfo::new(0, 300.0))]);
    }

    #[test]
    fn width_forwarded_once_per_value() {
        let (mut controller, _log) = presented_at(0);
        controller.container_width_changed(390.0);
        controller.container_width_changed(390.0);
        controller.container_width_changed(844.0);
        assert_eq!(
            controller.platform().calls,
            vec![Call::Resize(390.0), Call::Resize(844.0)]
        );
    }

    #[test]
    fn invalid_widths_are_never_forwarded() {
        let (mut controller, log) = presented_at(0);
        controller.container_width_changed(f64::NAN);
        controller.container_width_changed(f64::NAN);
        controller.container_width_changed(f64::INFINITY);
        controller.container_width_changed(-1.0);
        assert!(controller.platform().calls.is_empty());
        assert!(log.is_empty());

        controller.container_width_changed(390.0);
        assert_eq!(controller.platform().calls, vec![Call::Resize(390.0)]);
    }

    #[test]
    fn pending_work_tracks_outstanding_requests() {
        let (mut controller, _log) = controller();
        assert!(!controller.has_pending_work());

        let _presented = controller.present(0);
        assert!(controller.has_pending_work());
        controller.presentation_finished();
        assert!(!controller.has_pending_work());

        let _dismissed = controller.dismiss();
        let _queued = controller.present(1);
        assert!(controller.has_pending_work());
        controller.dismissal_finished();
        controller.presentation_finished();
        assert!(!controller.has_pending_work());
    }

    #[test]
    fn keyboard_needs_presented_sheet_with_footer() {
        let log = EventLog::new();
        let mut controller = SheetPresentationController::new(StubPlatform::default(), log);
        controller
            .attach(CONTENT.with_footer(ViewHandle::new(2)))
            .unwrap();
        controller.configure(medium_large(), false);

        controller.keyboard_will_show(300.0);
        assert!(controller.platform().calls.is_empty());

        let _ = controller.present(0);
        controller.presentation_finished();
        controller.platform_mut().calls.clear();

        controller.keyboard_will_show(300.0);
        controller.keyboard_will_hide();
        assert_eq!(
            controller.platform().calls,
            vec![Call::Footer(-300.0), Call::Footer(0.0)]
        );
    }

    #[test]
    fn keyboard_hide_during_dismissal_lowers_footer() {
        let log = EventLog::new();
        let mut controller = SheetPresentationController::new(StubPlatform::default(), log);
        controller
            .attach(CONTENT.with_footer(ViewHandle::new(2)))
            .unwrap();
        controller.configure(medium_large(), false);
        let _ = controller.present(0);
        controller.presentation_finished();
        controller.keyboard_will_show(300.0);

        let _ = controller.dismiss();
        controller.keyboard_will_hide();
        controller.dismissal_finished();
        assert_eq!(
            controller.platform().calls.last(),
            Some(&Call::Footer(0.0))
        );
        assert_eq!(controller.keyboard.offset(), 0.0);
    }

    #[test]
    fn dismissal_with_keyboard_up_lowers_footer() {
        let log = EventLog::new();
        let mut controller = SheetPresentationController::new(StubPlatform::default(), log);
        controller
            .attach(CONTENT.with_footer(ViewHandle::new(2)))
            .unwrap();
        controller.configure(medium_large(), false);
        let _ = controller.present(0);
        controller.presentation_finished();
        controller.keyboard_will_show(300.0);
        controller.platform_mut().calls.clear();

        controller.dismissal_finished();
        assert_eq!(controller.platform().calls, vec![Call::Footer(0.0)]);

        // Nothing left to lower on the next presentation.
        let _ = controller.present(0);
        assert!(!controller.platform().calls[1..].contains(&Call::Footer(0.0)));
    }

    #[test]
    fn keyboard_without_footer_is_ignored() {
        let (mut controller, _log) = presented_at(0);
        controller.keyboard_will_show(300.0);
        assert!(controller.platform().calls.is_empty());
    }

    #[test]
    fn appearance_applied_only_while_visible() {
        let (mut controller, _log) = controller();
        let appearance = SheetAppearance {
            grabber: false,
            ..SheetAppearance::default()
        };
        controller.set_appearance(appearance);
        assert!(controller.platform().calls.is_empty());

        let (mut controller, _log) = presented_at(0);
        controller.set_appearance(SheetAppearance {
            dimmed_index: 1,
            scrollable: Some(ViewHandle::new(9)),
            ..SheetAppearance::default()
        });
        assert_eq!(
            controller.platform().calls,
            vec![
                Call::Appearance,
                Call::Detents {
                    selected: 0,
                    animated: true
                },
                Call::Pin(9)
            ]
        );
    }

    #[test]
    fn interactive_dismiss_follows_prop() {
        let (mut controller, _log) = controller();
        assert!(controller.should_dismiss_interactively());
        controller.set_appearance(SheetAppearance {
            dismissible: false,
            ..SheetAppearance::default()
        });
        assert!(!controller.should_dismiss_interactively());
    }

    #[test]
    fn dropping_controller_cancels_pending_outcomes() {
        let (mut controller, _log) = controller();
        let mut outcome = controller.present(0);
        drop(controller);
        assert_eq!(outcome.try_take(), Some(Err(SheetError::Cancelled)));
    }
}
