#![forbid(unsafe_code)]

//! Presentation options that do not affect detent heights.
//!
//! Corner radius, grabber visibility, background blur, dimming and the
//! interactive-dismiss flag are pushed to the platform as one
//! [`SheetAppearance`] value whenever any of them changes on a presented
//! sheet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;
use crate::view::ViewHandle;

/// Blur style token for the sheet background.
///
/// Mirrors the closed set of material styles the native platform knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlurTint {
    Light,
    Dark,
    Default,
    ExtraLight,
    Regular,
    Prominent,
    SystemUltraThinMaterial,
    SystemThinMaterial,
    SystemMaterial,
    SystemThickMaterial,
    SystemChromeMaterial,
    SystemUltraThinMaterialLight,
    SystemThinMaterialLight,
    SystemMaterialLight,
    SystemThickMaterialLight,
    SystemChromeMaterialLight,
    SystemUltraThinMaterialDark,
    SystemThinMaterialDark,
    SystemMaterialDark,
    SystemThickMaterialDark,
    SystemChromeMaterialDark,
}

impl BlurTint {
    /// Every tint, in declaration order.
    pub const ALL: [Self; 21] = [
        Self::Light,
        Self::Dark,
        Self::Default,
        Self::ExtraLight,
        Self::Regular,
        Self::Prominent,
        Self::SystemUltraThinMaterial,
        Self::SystemThinMaterial,
        Self::SystemMaterial,
        Self::SystemThickMaterial,
        Self::SystemChromeMaterial,
        Self::SystemUltraThinMaterialLight,
        Self::SystemThinMaterialLight,
        Self::SystemMaterialLight,
        Self::SystemThickMaterialLight,
        Self::SystemChromeMaterialLight,
        Self::SystemUltraThinMaterialDark,
        Self::SystemThinMaterialDark,
        Self::SystemMaterialDark,
        Self::SystemThickMaterialDark,
        Self::SystemChromeMaterialDark,
    ];

    /// The prop token for this tint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Default => "default",
            Self::ExtraLight => "extraLight",
            Self::Regular => "regular",
            Self::Prominent => "prominent",
            Self::SystemUltraThinMaterial => "systemUltraThinMaterial",
            Self::SystemThinMaterial => "systemThinMaterial",
            Self::SystemMaterial => "systemMaterial",
            Self::SystemThickMaterial => "systemThickMaterial",
            Self::SystemChromeMaterial => "systemChromeMaterial",
            Self::SystemUltraThinMaterialLight => "systemUltraThinMaterialLight",
            Self::SystemThinMaterialLight => "systemThinMaterialLight",
            Self::SystemMaterialLight => "systemMaterialLight",
            Self::SystemThickMaterialLight => "systemThickMaterialLight",
            Self::SystemChromeMaterialLight => "systemChromeMaterialLight",
            Self::SystemUltraThinMaterialDark => "systemUltraThinMaterialDark",
            Self::SystemThinMaterialDark => "systemThinMaterialDark",
            Self::SystemMaterialDark => "systemMaterialDark",
            Self::SystemThickMaterialDark => "systemThickMaterialDark",
            Self::SystemChromeMaterialDark => "systemChromeMaterialDark",
        }
    }
}

impl fmt::Display for BlurTint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlurTint {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tint| tint.as_str() == s)
            .ok_or_else(|| SheetError::config(format!("unknown blur tint {s:?}")))
    }
}

/// Non-detent presentation options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetAppearance {
    /// Corner radius; `None` keeps the platform default.
    pub corner_radius: Option<f64>,
    /// Show the native grabber handle.
    pub grabber: bool,
    /// Background blur; `None` removes the effect.
    pub blur_tint: Option<BlurTint>,
    /// Whether the user may drag the sheet away.
    pub dismissible: bool,
    /// Dim the background behind the sheet.
    pub dimmed: bool,
    /// First size index at which dimming starts. Ignored when `dimmed` is off.
    pub dimmed_index: usize,
    /// Scrollable view the platform should pin to the content.
    pub scrollable: Option<ViewHandle>,
}

impl Default for SheetAppearance {
    fn default() -> Self {
        Self {
            corner_radius: None,
            grabber: true,
            blur_tint: None,
            dismissible: true,
            dimmed: true,
            dimmed_index: 0,
            scrollable: None,
        }
    }
}

impl SheetAppearance {
    /// Index of the largest detent that leaves the background undimmed.
    ///
    /// `None` means every detent dims the background. With dimming off the
    /// last detent is returned, so no detent dims. `len` is the number of
    /// detents currently configured.
    pub fn largest_undimmed_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if !self.dimmed {
            return Some(len - 1);
        }
        if self.dimmed_index > 0 && self.dimmed_index < len {
            return Some(self.dimmed_index - 1);
        }
        None
    }
}
