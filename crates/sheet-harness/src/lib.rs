#![forbid(unsafe_code)]

//! Test doubles and fixtures for driving sheets without a windowing system.
//!
//! [`RecordingPlatform`] stands in for the native modal facility. It reports
//! a fixed window geometry and records every call the controller makes, so
//! tests can assert on the exact sequence of platform operations.
//! [`SheetFixture`] wires a recording platform, an [`EventLog`] and a
//! [`SheetHostView`] together and plays the platform's part in completing
//! animations.
//!
//! ```
//! use sheet_core::SheetConfig;
//! use sheet_harness::SheetFixture;
//! use sheet_runtime::{SheetEvent, SizeInfo};
//!
//! let mut fixture = SheetFixture::new(SheetConfig::default(), 800.0)?;
//! fixture.present_and_settle(0)?;
//! assert_eq!(fixture.events.take(), vec![SheetEvent::Present(SizeInfo::new(0, 400.0))]);
//! # Ok::<(), sheet_core::SheetError>(())
//! ```

use std::time::Duration;

use serde_json::{Value, json};
use sheet_core::{
    ContentContainer, NativeDetents, SheetAppearance, SheetConfig, SheetError, ViewHandle,
};
use sheet_runtime::{
    DetentSelection, EventLog, PresentationState, SheetHostView, SheetPlatform,
};

/// View tag of the fixture's content view.
pub const CONTENT_VIEW: ViewHandle = ViewHandle::new(1);

/// View tag of the fixture's footer view.
pub const FOOTER_VIEW: ViewHandle = ViewHandle::new(2);

/// One call made by the controller into the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    ApplyDetents {
        heights: Vec<f64>,
        native: Vec<bool>,
        selected: usize,
        largest_undimmed: Option<usize>,
        animated: bool,
    },
    ApplyAppearance(SheetAppearance),
    PresentSheet {
        content: ViewHandle,
        footer: Option<ViewHandle>,
    },
    DismissSheet,
    AnimateFooter {
        offset: f64,
        duration: Duration,
    },
    ResizeContent {
        width: f64,
    },
    PinScrollable {
        scrollable: ViewHandle,
    },
}

impl PlatformCall {
    /// Short name of the call, used in traces and counts.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ApplyDetents { .. } => "apply_detents",
            Self::ApplyAppearance(_) => "apply_appearance",
            Self::PresentSheet { .. } => "present_sheet",
            Self::DismissSheet => "dismiss_sheet",
            Self::AnimateFooter { .. } => "animate_footer",
            Self::ResizeContent { .. } => "resize_content",
            Self::PinScrollable { .. } => "pin_scrollable",
        }
    }

    /// JSON form of the call for trace output.
    pub fn to_json(&self) -> Value {
        match self {
            Self::ApplyDetents {
                heights,
                native,
                selected,
                largest_undimmed,
                animated,
            } => json!({
                "call": self.kind(),
                "heights": heights,
                "native": native,
                "selected": selected,
                "largest_undimmed": largest_undimmed,
                "animated": animated,
            }),
            Self::ApplyAppearance(appearance) => json!({
                "call": self.kind(),
                "corner_radius": appearance.corner_radius,
                "grabber": appearance.grabber,
                "blur_tint": appearance.blur_tint.map(|t| t.as_str()),
                "dismissible": appearance.dismissible,
                "dimmed": appearance.dimmed,
                "dimmed_index": appearance.dimmed_index,
            }),
            Self::PresentSheet { content, footer } => json!({
                "call": self.kind(),
                "content": content.raw(),
                "footer": footer.map(ViewHandle::raw),
            }),
            Self::DismissSheet => json!({ "call": self.kind() }),
            Self::AnimateFooter { offset, duration } => json!({
                "call": self.kind(),
                "offset": offset,
                "duration_secs": duration.as_secs_f64(),
            }),
            Self::ResizeContent { width } => json!({ "call": self.kind(), "width": width }),
            Self::PinScrollable { scrollable } => json!({
                "call": self.kind(),
                "scrollable": scrollable.raw(),
            }),
        }
    }
}

/// Platform double that records every call.
#[derive(Debug, Clone)]
pub struct RecordingPlatform {
    available_height: f64,
    bottom_inset: f64,
    native: NativeDetents,
    calls: Vec<PlatformCall>,
}

impl RecordingPlatform {
    /// A window with `available_height` points for the sheet.
    pub fn new(available_height: f64) -> Self {
        Self {
            available_height,
            bottom_inset: 0.0,
            native: NativeDetents::empty(),
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_bottom_inset(mut self, inset: f64) -> Self {
        self.bottom_inset = inset;
        self
    }

    #[must_use]
    pub fn with_native_detents(mut self, native: NativeDetents) -> Self {
        self.native = native;
        self
    }

    /// Change the window height (rotation, split view).
    pub fn set_available_height(&mut self, height: f64) {
        self.available_height = height;
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> &[PlatformCall] {
        &self.calls
    }

    /// Remove and return the recorded calls.
    pub fn take_calls(&mut self) -> Vec<PlatformCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded calls of the given kind.
    pub fn count(&self, kind: &str) -> usize {
        self.calls.iter().filter(|c| c.kind() == kind).count()
    }

    /// The most recent detent installation, if any.
    pub fn last_detents(&self) -> Option<&PlatformCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, PlatformCall::ApplyDetents { .. }))
    }

    /// Recorded calls as JSON lines.
    pub fn trace_jsonl(&self) -> String {
        self.calls
            .iter()
            .map(|c| c.to_json().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn record(&mut self, call: PlatformCall) {
        tracing::trace!(call = call.kind(), "platform call");
        self.calls.push(call);
    }
}

impl SheetPlatform for RecordingPlatform {
    fn available_height(&self) -> f64 {
        self.available_height
    }

    fn bottom_safe_area_inset(&self) -> f64 {
        self.bottom_inset
    }

    fn native_detents(&self) -> NativeDetents {
        self.native
    }

    fn apply_detents(&mut self, selection: DetentSelection<'_>, animated: bool) {
        let table = selection.table;
        let selected = table.position_of(selection.selected).unwrap_or_default();
        let largest_undimmed = selection
            .largest_undimmed
            .and_then(|id| table.position_of(id));
        self.record(PlatformCall::ApplyDetents {
            heights: table.heights().to_vec(),
            native: table.iter().map(|d| d.is_native()).collect(),
            selected,
            largest_undimmed,
            animated,
        });
    }

    fn apply_appearance(&mut self, appearance: &SheetAppearance) {
        self.record(PlatformCall::ApplyAppearance(*appearance));
    }

    fn present_sheet(&mut self, container: &ContentContainer) {
        self.record(PlatformCall::PresentSheet {
            content: container.content,
            footer: container.footer,
        });
    }

    fn dismiss_sheet(&mut self) {
        self.record(PlatformCall::DismissSheet);
    }

    fn animate_footer_offset(&mut self, offset: f64, duration: Duration) {
        self.record(PlatformCall::AnimateFooter { offset, duration });
    }

    fn resize_content(&mut self, _container: &ContentContainer, width: f64) {
        self.record(PlatformCall::ResizeContent { width });
    }

    fn pin_scrollable(&mut self, _container: &ContentContainer, scrollable: ViewHandle) {
        self.record(PlatformCall::PinScrollable { scrollable });
    }
}

/// A host view wired to a recording platform and an event log.
#[derive(Debug)]
pub struct SheetFixture {
    pub host: SheetHostView<RecordingPlatform>,
    pub events: EventLog,
}

impl SheetFixture {
    /// Fixture with a content view (no footer) attached.
    ///
    /// # Errors
    ///
    /// Propagates invalid props.
    pub fn new(config: SheetConfig, available_height: f64) -> Result<Self, SheetError> {
        Self::with_platform(
            RecordingPlatform::new(available_height),
            config,
            ContentContainer::new(CONTENT_VIEW),
        )
    }

    /// Fixture with a content view and a footer attached.
    ///
    /// # Errors
    ///
    /// Propagates invalid props.
    pub fn with_footer(config: SheetConfig, available_height: f64) -> Result<Self, SheetError> {
        Self::with_platform(
            RecordingPlatform::new(available_height),
            config,
            ContentContainer::new(CONTENT_VIEW).with_footer(FOOTER_VIEW),
        )
    }

    /// Fixture over a custom platform and container.
    ///
    /// # Errors
    ///
    /// Propagates invalid props.
    pub fn with_platform(
        platform: RecordingPlatform,
        config: SheetConfig,
        container: ContentContainer,
    ) -> Result<Self, SheetError> {
        let events = EventLog::new();
        let mut host = SheetHostView::with_config(platform, events.clone(), config)?;
        host.attach(container)?;
        Ok(Self { host, events })
    }

    /// The recording platform.
    pub fn platform(&self) -> &RecordingPlatform {
        self.host.controller().platform()
    }

    /// Mutable access to the recording platform.
    pub fn platform_mut(&mut self) -> &mut RecordingPlatform {
        self.host.controller_mut().platform_mut()
    }

    /// Present at `index` and complete the animation.
    ///
    /// # Errors
    ///
    /// Whatever the present outcome resolved to.
    pub fn present_and_settle(&mut self, index: usize) -> Result<(), SheetError> {
        let mut outcome = self.host.present(index);
        if self.host.state() == PresentationState::Presenting {
            self.host.presentation_finished();
        }
        outcome.try_take().unwrap_or(Err(SheetError::Cancelled))
    }

    /// Dismiss and complete the animation.
    ///
    /// # Errors
    ///
    /// Whatever the dismiss outcome resolved to.
    pub fn dismiss_and_settle(&mut self) -> Result<(), SheetError> {
        let mut outcome = self.host.dismiss();
        if self.host.state() == PresentationState::Dismissing {
            self.host.dismissal_finished();
        }
        outcome.try_take().unwrap_or(Err(SheetError::Cancelled))
    }

    /// Simulate the user dragging the sheet to the detent at `index`.
    ///
    /// Returns `false` if the current table has no such detent.
    pub fn drag_to(&mut self, index: usize) -> bool {
        let Some(id) = self.host.controller().table().at(index).map(|d| d.id()) else {
            return false;
        };
        self.host.selected_detent_changed(id);
        true
    }

    /// Simulate the user swiping the sheet off screen.
    pub fn swipe_away(&mut self) {
        self.host.dismissal_finished();
    }
}
