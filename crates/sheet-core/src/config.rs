#![forbid(unsafe_code)]

//! Sheet props as delivered by the embedding layer.
//!
//! [`SheetConfig`] holds every prop the declarative wrapper can set on a
//! sheet. It deserializes from the wrapper's JSON prop object (camelCase
//! keys, every key optional) and offers builder-style setters for Rust
//! callers.
//!
//! ```
//! use sheet_core::{SheetConfig, SizeSpec};
//!
//! let config = SheetConfig::from_json(r#"{ "sizes": ["auto", "large"], "grabber": false }"#)?;
//! assert_eq!(config.sizes, vec![SizeSpec::Auto, "large".parse()?]);
//! assert!(!config.grabber);
//! assert!(config.dismissible);
//! # Ok::<(), sheet_core::SheetError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::appearance::{BlurTint, SheetAppearance};
use crate::error::SheetError;
use crate::size::{SizeSpec, default_sizes};
use crate::view::ViewHandle;

/// Every prop a sheet accepts, with the component's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetConfig {
    /// Resting sizes, collapsed to expanded by convention.
    pub sizes: Vec<SizeSpec>,
    /// Caps every resolved detent.
    pub max_height: Option<f64>,
    /// Corner radius; `None` keeps the platform default.
    pub corner_radius: Option<f64>,
    /// Dim the background behind the sheet.
    pub dimmed: bool,
    /// Size index at which the background starts dimming.
    pub dimmed_index: usize,
    /// Show the native grabber.
    pub grabber: bool,
    /// Background blur style.
    pub blur_tint: Option<BlurTint>,
    /// Allow interactive (drag) dismissal.
    pub dismissible: bool,
    /// Scrollable view to pin inside the content.
    pub scrollable_handle: Option<ViewHandle>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            max_height: None,
            corner_radius: None,
            dimmed: true,
            dimmed_index: 0,
            grabber: true,
            blur_tint: None,
            dismissible: true,
            scrollable_handle: None,
        }
    }
}

impl SheetConfig {
    /// Parse a JSON prop object.
    ///
    /// Unknown keys (such as the wrapper's `name` or style props) are ignored.
    ///
    /// # Errors
    ///
    /// [`SheetError::Configuration`] when the JSON is malformed or a value
    /// is out of range.
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| SheetError::config(format!("invalid sheet props: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric props.
    ///
    /// Size-list length is checked at resolution time, where the truncation
    /// policy applies.
    ///
    /// # Errors
    ///
    /// [`SheetError::Configuration`] for a non-positive max height, a
    /// negative corner radius, or an invalid size spec.
    pub fn validate(&self) -> Result<(), SheetError> {
        for size in &self.sizes {
            size.validate()?;
        }
        if let Some(max) = self.max_height
            && (!max.is_finite() || max <= 0.0)
        {
            return Err(SheetError::config(format!(
                "max height must be a positive number, got {max}"
            )));
        }
        if let Some(radius) = self.corner_radius
            && (!radius.is_finite() || radius < 0.0)
        {
            return Err(SheetError::config(format!(
                "corner radius must be a non-negative number, got {radius}"
            )));
        }
        Ok(())
    }

    /// The non-detent presentation options derived from these props.
    pub fn appearance(&self) -> SheetAppearance {
        SheetAppearance {
            corner_radius: self.corner_radius,
            grabber: self.grabber,
            blur_tint: self.blur_tint,
            dismissible: self.dismissible,
            dimmed: self.dimmed,
            dimmed_index: self.dimmed_index,
            scrollable: self.scrollable_handle,
        }
    }

    pub fn sizes(mut self, sizes: impl Into<Vec<SizeSpec>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    pub fn max_height(mut self, height: f64) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    pub fn dimmed_index(mut self, index: usize) -> Self {
        self.dimmed_index = index;
        self
    }

    pub fn grabber(mut self, visible: bool) -> Self {
        self.grabber = visible;
        self
    }

    pub fn blur_tint(mut self, tint: BlurTint) -> Self {
        self.blur_tint = Some(tint);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn scrollable_handle(mut self, handle: ViewHandle) -> Self {
        self.scrollable_handle = Some(handle);
        self
    }
}
