#![forbid(unsafe_code)]

//! Size resolution: abstract [`SizeSpec`]s to concrete detent heights.
//!
//! # Rules
//!
//! | Spec | Height before capping |
//! |------|------------------------|
//! | `Auto` | content + footer, or half the available height while unmeasured |
//! | `Fixed(h)` | `h` |
//! | `Percent(p)` | `available * p / 100` |
//! | `Named(n)` | `available * n.fraction()` (25% / 50% / 100%) |
//!
//! The raw height is then capped by `max_height` (if set), clipped to the
//! available height, and floored at [`MIN_DETENT_HEIGHT`] so every detent
//! stays a positive value.
//!
//! # Invariants
//!
//! - Heights depend only on the inputs; two calls with equal inputs yield
//!   equal heights (identifiers differ).
//! - Every height is `> 0` and `<= available_height`.
//! - The output has between 1 and [`MAX_DETENTS`] entries, indexed `0..n`.
//! - At most one entry is `Auto`.
//!
//! # Failure Modes
//!
//! - Empty size list: [`SheetError::Configuration`].
//! - More than [`MAX_DETENTS`] sizes: truncated with a warning, or
//!   rejected under [`TruncationPolicy::Reject`].
//! - More than one `Auto` among the kept sizes: [`SheetError::Configuration`].
//! - Non-finite or non-positive available height, non-positive max height,
//!   or an out-of-range spec: [`SheetError::Configuration`].

use sheet_core::{ContentMetrics, NativeDetents, SheetError, SizeSpec};

use crate::detent::{DetentTable, MAX_DETENTS};

/// Smallest height a detent resolves to.
pub const MIN_DETENT_HEIGHT: f64 = 1.0;

/// Fraction of the available height used for `Auto` before the content is
/// measured.
pub const AUTO_FALLBACK_FRACTION: f64 = 0.5;

/// What to do with size lists longer than [`MAX_DETENTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationPolicy {
    /// Keep the first [`MAX_DETENTS`] sizes and log a warning.
    #[default]
    Truncate,
    /// Fail with [`SheetError::Configuration`].
    Reject,
}

/// Converts size specs into a [`DetentTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeResolver {
    policy: TruncationPolicy,
    native: NativeDetents,
}

impl SizeResolver {
    /// A resolver that truncates long size lists and knows no native detents.
    pub const fn new() -> Self {
        Self {
            policy: TruncationPolicy::Truncate,
            native: NativeDetents::empty(),
        }
    }

    /// Set the policy for size lists longer than [`MAX_DETENTS`].
    pub const fn policy(mut self, policy: TruncationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set which named sizes the platform presents natively.
    pub const fn native_detents(mut self, native: NativeDetents) -> Self {
        self.native = native;
        self
    }

    /// Check a size list without resolving it.
    ///
    /// Returns the sizes that resolution would keep.
    ///
    /// # Errors
    ///
    /// See the module-level failure modes.
    pub fn validate<'a>(&self, sizes: &'a [SizeSpec]) -> Result<&'a [SizeSpec], SheetError> {
        if sizes.is_empty() {
            return Err(SheetError::config("at least one size is required"));
        }
        for size in sizes {
            size.validate()?;
        }
        if sizes.len() > MAX_DETENTS {
            match self.policy {
                TruncationPolicy::Truncate => {
                    tracing::warn!(
                        given = sizes.len(),
                        kept = MAX_DETENTS,
                        "sheet supports at most {MAX_DETENTS} sizes; extra sizes are ignored"
                    );
                }
                TruncationPolicy::Reject => {
                    return Err(SheetError::config(format!(
                        "at most {MAX_DETENTS} sizes are supported, got {}",
                        sizes.len()
                    )));
                }
            }
        }
        let kept = &sizes[..sizes.len().min(MAX_DETENTS)];
        let autos = kept.iter().filter(|&&size| size == SizeSpec::Auto).count();
        if autos > 1 {
            return Err(SheetError::config(format!(
                "at most one auto size is allowed, got {autos}"
            )));
        }
        Ok(kept)
    }

    /// Resolve `sizes` against the measured content and available height.
    ///
    /// # Errors
    ///
    /// See the module-level failure modes.
    pub fn resolve(
        &self,
        sizes: &[SizeSpec],
        metrics: &ContentMetrics,
        available_height: f64,
    ) -> Result<DetentTable, SheetError> {
        let _span = tracing::debug_span!(
            "resolve_sizes",
            count = sizes.len(),
            available = available_height
        )
        .entered();

        if !available_height.is_finite() || available_height <= 0.0 {
            return Err(SheetError::config(format!(
                "available height must be a positive number, got {available_height}"
            )));
        }
        if let Some(max) = metrics.max_height
            && (!max.is_finite() || max <= 0.0)
        {
            return Err(SheetError::config(format!(
                "max height must be a positive number, got {max}"
            )));
        }

        let kept = self.validate(sizes)?;
        let table = DetentTable::from_entries(kept.iter().map(|&spec| {
            let height = resolve_height(spec, metrics, available_height);
            (spec, height, self.is_native(spec))
        }));

        tracing::debug!(heights = ?table.heights(), "sizes resolved");
        Ok(table)
    }

    fn is_native(&self, spec: SizeSpec) -> bool {
        match spec {
            SizeSpec::Named(size) => self.native.supports(size),
            _ => false,
        }
    }
}

/// Height for a single spec, capped and clipped.
fn resolve_height(spec: SizeSpec, metrics: &ContentMetrics, available: f64) -> f64 {
    let raw = match spec {
        SizeSpec::Auto => metrics
            .fitted_height()
            .unwrap_or(available * AUTO_FALLBACK_FRACTION),
        SizeSpec::Fixed(height) => height,
        SizeSpec::Percent(percent) => available * percent / 100.0,
        SizeSpec::Named(size) => available * size.fraction(),
    };
    let capped = metrics.max_height.map_or(raw, |max| raw.min(max));
    capped.min(available).max(MIN_DETENT_HEIGHT.min(available))
}
