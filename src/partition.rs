//! Partition selector
//!
//! Picks the cells used for training. Selection is without replacement and
//! consumes randomness only from the generator it is handed, so a fixed
//! seed yields a fixed subset.

use std::collections::BTreeSet;

use rand::seq::index;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::data::RecordingEntry;
use crate::registry::CellIds;
use crate::{Error, Result};

/// Draw `k` distinct indices from `0..n`, uniformly without replacement.
///
/// Indices are returned in draw order.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `k > n`. No randomness is consumed
/// in that case.
pub fn random_select(k: usize, n: usize, rng: &mut dyn RngCore) -> Result<Vec<usize>> {
    if k > n {
        return Err(Error::invalid(format!(
            "cannot select {k} of {n} cells without replacement"
        )));
    }
    Ok(index::sample(rng, n, k).into_vec())
}

/// Cells selected for training.
///
/// `indices` point into the sorted [`CellIds`]; `cells` holds the resolved
/// cell numbers in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSubset {
    indices: Vec<usize>,
    cells: Vec<i64>,
}

impl TrainingSubset {
    /// Select training cells.
    ///
    /// `num_train <= 0` selects every cell and draws nothing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `num_train` exceeds the number of
    /// distinct cells.
    pub fn select(num_train: i64, cell_ids: &CellIds, rng: &mut dyn RngCore) -> Result<Self> {
        let indices = match usize::try_from(num_train) {
            Ok(k) if k > 0 => random_select(k, cell_ids.len(), rng)?,
            Ok(_) => (0..cell_ids.len()).collect(),
            Err(_) if num_train < 0 => (0..cell_ids.len()).collect(),
            Err(_) => {
                return Err(Error::invalid(format!(
                    "num_train {num_train} does not fit this platform"
                )))
            }
        };
        Ok(Self::from_indices(indices, cell_ids))
    }

    fn from_indices(indices: Vec<usize>, cell_ids: &CellIds) -> Self {
        let cells: BTreeSet<i64> = indices.iter().filter_map(|&i| cell_ids.get(i)).collect();
        Self {
            indices,
            cells: cells.into_iter().collect(),
        }
    }

    /// Indices into the sorted cell identifier set, in draw order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Selected cell numbers, ascending.
    #[must_use]
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Number of selected cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no cell was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `cell_num` belongs to the subset.
    #[must_use]
    pub fn contains(&self, cell_num: i64) -> bool {
        self.cells.binary_search(&cell_num).is_ok()
    }

    /// Keep the entries whose cell is in the subset, preserving order.
    #[must_use]
    pub fn select_entries(&self, entries: Vec<RecordingEntry>) -> Vec<RecordingEntry> {
        entries
            .into_iter()
            .filter(|entry| entry.cell_num().is_some_and(|cell| self.contains(cell)))
            .collect()
    }
}
