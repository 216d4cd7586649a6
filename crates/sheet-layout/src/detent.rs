#![forbid(unsafe_code)]

//! Resolved detents and the table that indexes them.
//!
//! A [`DetentTable`] is rebuilt on every resolution pass. Each pass mints
//! fresh [`DetentId`]s, so an identifier remembered from an older table
//! never matches an entry in a newer one. Callers that need to carry the
//! active detent across a rebuild do it by index
//! ([`DetentTable::carry_active_from`]).
//!
//! # Invariants
//!
//! - `at(i).index() == i` for every entry.
//! - Indices are contiguous `0..len`, `len <= MAX_DETENTS`.
//! - `active_index()`, when set, is `< len`.
//! - Identifiers are unique across all tables built in the process.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use sheet_core::{SheetError, SizeSpec};
use smallvec::SmallVec;

/// Most detents a sheet can rest at.
pub const MAX_DETENTS: usize = 3;

/// Global counter for detent identifiers.
static DETENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifier of one detent within one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetentId(u64);

impl DetentId {
    /// Mint an identifier that has never been handed out before.
    pub(crate) fn next() -> Self {
        Self(DETENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DetentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "detent-{}", self.0)
    }
}

/// One resting height of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDetent {
    index: usize,
    id: DetentId,
    height: f64,
    spec: SizeSpec,
    native: bool,
}

impl ResolvedDetent {
    /// Position within the size list.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Identifier minted for this resolution pass.
    #[inline]
    pub const fn id(&self) -> DetentId {
        self.id
    }

    /// Resolved height in points.
    #[inline]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// The spec this detent was resolved from.
    #[inline]
    pub const fn spec(&self) -> SizeSpec {
        self.spec
    }

    /// Whether the platform should use its built-in detent for this entry.
    #[inline]
    pub const fn is_native(&self) -> bool {
        self.native
    }
}

/// Ordered detents for one resolution pass plus the active index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetentTable {
    detents: SmallVec<[ResolvedDetent; MAX_DETENTS]>,
    active: Option<usize>,
}

impl DetentTable {
    /// Build a table from `(spec, height, native)` entries in order.
    ///
    /// Fresh identifiers are minted for every entry.
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (SizeSpec, f64, bool)>) -> Self {
        let detents = entries
            .into_iter()
            .take(MAX_DETENTS)
            .enumerate()
            .map(|(index, (spec, height, native))| ResolvedDetent {
                index,
                id: DetentId::next(),
                height,
                spec,
                native,
            })
            .collect();
        Self {
            detents,
            active: None,
        }
    }

    /// Look up a detent by identifier.
    ///
    /// Identifiers from an older table return `None`.
    pub fn lookup(&self, id: DetentId) -> Option<&ResolvedDetent> {
        self.detents.iter().find(|d| d.id == id)
    }

    /// Position of the detent with the given identifier.
    pub fn position_of(&self, id: DetentId) -> Option<usize> {
        self.lookup(id).map(ResolvedDetent::index)
    }

    /// Detent at `index`.
    pub fn at(&self, index: usize) -> Option<&ResolvedDetent> {
        self.detents.get(index)
    }

    /// Index the sheet is resting at, `None` when not presented.
    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active detent, if any.
    pub fn active(&self) -> Option<&ResolvedDetent> {
        self.active.and_then(|index| self.at(index))
    }

    /// Set or clear the active index.
    ///
    /// # Errors
    ///
    /// [`SheetError::InvalidSizeIndex`] if `index` is out of range; the
    /// active index is left unchanged.
    pub fn set_active(&mut self, index: Option<usize>) -> Result<(), SheetError> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.active = index;
        Ok(())
    }

    /// Clear the active index (the sheet is no longer presented).
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Fail with [`SheetError::InvalidSizeIndex`] unless `index` is in range.
    pub fn check_index(&self, index: usize) -> Result<(), SheetError> {
        if index < self.len() {
            Ok(())
        } else {
            Err(SheetError::InvalidSizeIndex {
                index,
                len: self.len(),
            })
        }
    }

    /// Take over the active index of a previous table.
    ///
    /// The old index is kept when it still exists in this table, otherwise
    /// the table falls back to index 0. A previous table with no active
    /// index leaves this one inactive.
    pub fn carry_active_from(&mut self, previous: &Self) {
        self.active = match previous.active {
            Some(index) if index < self.len() => Some(index),
            Some(_) if !self.is_empty() => Some(0),
            _ => None,
        };
    }

    /// Number of detents.
    #[inline]
    pub fn len(&self) -> usize {
        self.detents.len()
    }

    /// Whether the table has no detents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detents.is_empty()
    }

    /// Iterate detents in index order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDetent> {
        self.detents.iter()
    }

    /// Resolved heights in index order.
    pub fn heights(&self) -> SmallVec<[f64; MAX_DETENTS]> {
        self.detents.iter().map(|d| d.height).collect()
    }
}

impl<'a> IntoIterator for &'a DetentTable {
    type Item = &'a ResolvedDetent;
    type IntoIter = std::slice::Iter<'a, ResolvedDetent>;

    fn into_iter(self) -> Self::IntoIter {
        self.detents.iter()
    }
}
