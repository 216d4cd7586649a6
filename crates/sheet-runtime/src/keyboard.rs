#![forbid(unsafe_code)]

//! Footer offset tracking for the software keyboard.
//!
//! When the keyboard slides in, the footer moves up by the keyboard height;
//! when it slides out the footer returns to the bottom. Both moves use the
//! same fixed duration.

use std::time::Duration;

/// Duration of footer offset animations.
pub const KEYBOARD_ANIMATION: Duration = Duration::from_millis(300);

/// A footer move to hand to the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetAnimation {
    /// New bottom offset of the footer (negative moves it up).
    pub offset: f64,
    /// Animation duration.
    pub duration: Duration,
}

/// Computes footer offsets from keyboard events.
///
/// The adjuster only does arithmetic; the controller decides whether the
/// sheet is in a state where keyboard events apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardInsetAdjuster {
    offset: f64,
}

impl KeyboardInsetAdjuster {
    /// Adjuster with the footer at rest.
    pub const fn new() -> Self {
        Self { offset: 0.0 }
    }

    /// Current footer offset.
    #[inline]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Keyboard is about to show with the given height.
    ///
    /// Returns `None` if the footer is already at that offset.
    pub fn keyboard_will_show(&mut self, keyboard_height: f64) -> Option<InsetAnimation> {
        self.move_to(-keyboard_height.max(0.0))
    }

    /// Keyboard is about to hide.
    pub fn keyboard_will_hide(&mut self) -> Option<InsetAnimation> {
        self.move_to(0.0)
    }

    /// Put the footer back at rest.
    ///
    /// Returns the move the platform must still apply, if the footer was
    /// raised.
    pub fn reset(&mut self) -> Option<InsetAnimation> {
        self.move_to(0.0)
    }

    fn move_to(&mut self, offset: f64) -> Option<InsetAnimation> {
        if (self.offset - offset).abs() < f64::EPSILON {
            return None;
        }
        self.offset = offset;
        Some(InsetAnimation {
            offset,
            duration: KEYBOARD_ANIMATION,
        })
    }
}
