//! Cell registry
//!
//! Ensures every entry carries a `cell_num` and derives the sorted set of
//! distinct cell identifiers.
//!
//! The presence check is made once, on the first entry only. If the first
//! entry is labelled the whole collection is assumed labelled and nothing is
//! touched; otherwise every entry is relabelled with its position (one cell
//! per trace).

use std::collections::BTreeSet;

use crate::data::RecordingEntry;
use crate::{Error, Result};

/// Assign positional cell numbers unless the first entry already has one.
///
/// Returns `true` if entries were relabelled.
pub fn assign_cell_numbers(entries: &mut [RecordingEntry]) -> bool {
    match entries.first() {
        Some(first) if first.cell_num().is_none() => {
            for (k, entry) in entries.iter_mut().enumerate() {
                entry.set_cell_num(i64::try_from(k).unwrap_or(i64::MAX));
            }
            true
        }
        _ => false,
    }
}

/// Sorted, distinct cell identifiers present in a recording collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellIds(Vec<i64>);

impl CellIds {
    /// Collect the distinct cell numbers of `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCellNum`] for the first unlabelled entry.
    pub fn collect(entries: &[RecordingEntry]) -> Result<Self> {
        let mut ids = BTreeSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let cell = entry.cell_num().ok_or(Error::MissingCellNum { index })?;
            ids.insert(cell);
        }
        Ok(Self(ids.into_iter().collect()))
    }

    /// Number of distinct cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cell identifier at sorted position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }

    /// All identifiers in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

/// Normalize `entries` and return their cell identifier set.
///
/// # Errors
///
/// See [`CellIds::collect`].
pub fn register(entries: &mut [RecordingEntry]) -> Result<CellIds> {
    if assign_cell_numbers(entries) {
        tracing::debug!(entries = entries.len(), "assigned positional cell numbers");
    }
    CellIds::collect(entries)
}
