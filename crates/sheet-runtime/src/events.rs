#![forbid(unsafe_code)]

//! Lifecycle notifications delivered to the embedding layer.
//!
//! The controller reports through [`SheetObserver`], a capability trait with
//! one method per notification kind. [`EventLog`] is a ready-made observer
//! that records notifications as serializable [`SheetEvent`]s in the
//! `{ "type": "onPresent", "payload": { "index": 0, "value": 400.0 } }`
//! shape the declarative wrapper consumes.
//!
//! # Ordering
//!
//! 1. `did_present` precedes the first `did_change_size` of a presentation.
//! 2. `did_dismiss` is the last notification before the sheet is dismissed.
//! 3. Each transition is reported exactly once.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use sheet_layout::ResolvedDetent;

/// Payload of present and size-change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeInfo {
    /// Position of the active detent in the size list.
    pub index: usize,
    /// Resolved height of the active detent.
    pub value: f64,
}

impl SizeInfo {
    /// Create a payload.
    pub const fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }
}

impl From<&ResolvedDetent> for SizeInfo {
    fn from(detent: &ResolvedDetent) -> Self {
        Self::new(detent.index(), detent.height())
    }
}

/// Receiver of sheet lifecycle notifications.
pub trait SheetObserver {
    /// The sheet finished presenting and rests at `info`.
    fn did_present(&mut self, info: SizeInfo);

    /// The sheet moved to a different detent, by drag or programmatically.
    fn did_change_size(&mut self, info: SizeInfo);

    /// The sheet finished dismissing.
    fn did_dismiss(&mut self);

    /// The presenting container changed width (for example on rotation).
    fn did_change_width(&mut self, _width: f64) {}
}

/// A recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SheetEvent {
    #[serde(rename = "onPresent")]
    Present(SizeInfo),
    #[serde(rename = "onSizeChange")]
    SizeChange(SizeInfo),
    #[serde(rename = "onDismiss")]
    Dismiss,
}

/// Shared, cloneable observer that records every notification.
///
/// Clones share the same log, so one clone can be handed to the controller
/// while another is kept to read the events back.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SheetEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<SheetEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return the recorded events.
    pub fn take(&self) -> Vec<SheetEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: SheetEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl SheetObserver for EventLog {
    fn did_present(&mut self, info: SizeInfo) {
        self.push(SheetEvent::Present(info));
    }

    fn did_change_size(&mut self, info: SizeInfo) {
        self.push(SheetEvent::SizeChange(info));
    }

    fn did_dismiss(&mut self) {
        self.push(SheetEvent::Dismiss);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_in_wrapper_shape() {
        let json = serde_json::to_string(&SheetEvent::Present(SizeInfo::new(0, 400.0)))
            .expect("serializable");
        assert_eq!(
            json,
            r#"{"type":"onPresent","payload":{"index":0,"value":400.0}}"#
        );
        let json = serde_json::to_string(&SheetEvent::Dismiss).expect("serializable");
        assert_eq!(json, r#"{"type":"onDismiss"}"#);
    }

    #[test]
    fn clones_share_the_log() {
        let log = EventLog::new();
        let mut observer = log.clone();
        observer.did_present(SizeInfo::new(1, 800.0));
        observer.did_dismiss();
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.take(),
            vec![SheetEvent::Present(SizeInfo::new(1, 800.0)), SheetEvent::Dismiss]
        );
        assert!(log.is_empty());
    }
}
