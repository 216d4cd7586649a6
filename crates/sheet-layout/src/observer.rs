#![forbid(unsafe_code)]

//! Change-filtered tracking of content and footer heights.
//!
//! Layout passes fire constantly, including on every frame of an
//! interactive drag. [`ContentLayoutObserver`] records each measured height
//! and reports whether it actually changed, so callers re-resolve sizes
//! only when something moved.
//!
//! # Invariants
//!
//! 1. Reporting the same height twice in a row yields `true` at most once.
//! 2. Content heights are stored net of the platform's bottom safe-area
//!    inset and never go below zero.
//! 3. A footer without children measures zero.

use sheet_core::ContentMetrics;

/// Heights closer than this are treated as equal.
const HEIGHT_EPSILON: f64 = 0.01;

fn same_height(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() < HEIGHT_EPSILON,
        (None, None) => true,
        _ => false,
    }
}

/// Records measured heights and filters out no-op layout passes.
#[derive(Debug, Clone, Default)]
pub struct ContentLayoutObserver {
    metrics: ContentMetrics,
    bottom_inset: f64,
}

impl ContentLayoutObserver {
    /// Create an observer with empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current metrics.
    #[inline]
    pub fn metrics(&self) -> &ContentMetrics {
        &self.metrics
    }

    /// Set the bottom safe-area inset subtracted from content heights.
    pub fn set_bottom_inset(&mut self, inset: f64) {
        self.bottom_inset = inset.max(0.0);
    }

    /// Record a content layout pass. Returns `true` if the height changed.
    pub fn content_laid_out(&mut self, height: f64) -> bool {
        let net = (height - self.bottom_inset).max(0.0);
        self.record(|m| &mut m.content_height, Some(net))
    }

    /// Record a footer layout pass. Returns `true` if the height changed.
    pub fn footer_laid_out(&mut self, height: f64, has_children: bool) -> bool {
        let height = if has_children { height.max(0.0) } else { 0.0 };
        self.record(|m| &mut m.footer_height, Some(height))
    }

    /// Record the max-height prop. Returns `true` if it changed.
    pub fn set_max_height(&mut self, max_height: Option<f64>) -> bool {
        self.record(|m| &mut m.max_height, max_height)
    }

    /// Forget all measurements.
    pub fn reset(&mut self) {
        self.metrics = ContentMetrics::new();
    }

    fn record(
        &mut self,
        field: impl FnOnce(&mut ContentMetrics) -> &mut Option<f64>,
        value: Option<f64>,
    ) -> bool {
        let slot = field(&mut self.metrics);
        if same_height(*slot, value) {
            return false;
        }
        *slot = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_passes_report_once() {
        let mut observer = ContentLayoutObserver::new();
        assert!(observer.content_laid_out(320.0));
        assert!(!observer.content_laid_out(320.0));
        assert!(!observer.content_laid_out(320.001));
        assert!(observer.content_laid_out(330.0));
        assert_eq!(observer.metrics().content_height, Some(330.0));
    }

    #[test]
    fn bottom_inset_is_subtracted() {
        let mut observer = ContentLayoutObserver::new();
        observer.set_bottom_inset(34.0);
        observer.content_laid_out(334.0);
        assert_eq!(observer.metrics().content_height, Some(300.0));

        observer.content_laid_out(10.0);
        assert_eq!(observer.metrics().content_height, Some(0.0));
    }

    #[test]
    fn empty_footer_measures_zero() {
        let mut observer = ContentLayoutObserver::new();
        assert!(observer.footer_laid_out(56.0, false));
        assert_eq!(observer.metrics().footer_height, Some(0.0));
        assert!(!observer.footer_laid_out(80.0, false));
        assert!(observer.footer_laid_out(56.0, true));
        assert_eq!(observer.metrics().footer_height, Some(56.0));
    }

    #[test]
    fn max_height_changes() {
        let mut observer = ContentLayoutObserver::new();
        assert!(!observer.set_max_height(None));
        assert!(observer.set_max_height(Some(600.0)));
        assert!(!observer.set_max_height(Some(600.0)));
        assert!(observer.set_max_height(None));
    }

    #[test]
    fn reset_clears_everything() {
        let mut observer = ContentLayoutObserver::new();
        observer.content_laid_out(300.0);
        observer.footer_laid_out(40.0, true);
        observer.set_max_height(Some(500.0));
        observer.reset();
        assert_eq!(*observer.metrics(), ContentMetrics::new());
        // After a reset the same height counts as a change again.
        assert!(observer.content_laid_out(300.0));
    }
}
