#![forbid(unsafe_code)]

//! Opaque handles for views owned by the embedding layer.

use serde::{Deserialize, Serialize};

/// Opaque reference to a view in the embedding layer's tree.
///
/// The core never dereferences a handle; it only hands it back to the
/// platform (for example a native view tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewHandle(u64);

impl ViewHandle {
    /// Wrap a raw view tag.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw tag.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The single container holding a sheet's body and optional footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentContainer {
    /// The sheet body.
    pub content: ViewHandle,
    /// The floating footer, if the embedding layer rendered one.
    pub footer: Option<ViewHandle>,
}

impl ContentContainer {
    /// A container with a body and no footer.
    pub const fn new(content: ViewHandle) -> Self {
        Self {
            content,
            footer: None,
        }
    }

    /// Attach a footer view.
    pub const fn with_footer(mut self, footer: ViewHandle) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Whether a footer view is present.
    pub const fn has_footer(&self) -> bool {
        self.footer.is_some()
    }
}
