#![forbid(unsafe_code)]

//! Measured content heights consumed by size resolution.

/// Heights reported by the embedding layer's layout passes.
///
/// Created empty, refreshed on every layout pass of the embedded content,
/// and cleared when the sheet is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentMetrics {
    /// Measured height of the sheet body, if known.
    pub content_height: Option<f64>,
    /// Measured height of the footer, if known.
    pub footer_height: Option<f64>,
    /// Upper bound applied to every resolved detent.
    pub max_height: Option<f64>,
}

impl ContentMetrics {
    /// Create empty metrics.
    pub const fn new() -> Self {
        Self {
            content_height: None,
            footer_height: None,
            max_height: None,
        }
    }

    /// Set the content height.
    pub fn content_height(mut self, height: f64) -> Self {
        self.content_height = Some(height);
        self
    }

    /// Set the footer height.
    pub fn footer_height(mut self, height: f64) -> Self {
        self.footer_height = Some(height);
        self
    }

    /// Set the maximum height.
    pub fn max_height(mut self, height: f64) -> Self {
        self.max_height = Some(height);
        self
    }

    /// Content plus footer, or `None` while the content is unmeasured.
    pub fn fitted_height(&self) -> Option<f64> {
        self.content_height
            .map(|content| content + self.footer_height.unwrap_or(0.0))
    }
}
