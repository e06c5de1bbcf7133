//! Preprocessing collaborator
//!
//! Preprocessing runs on the complete aggregated dataset, before cell
//! registration and partitioning.

use anyhow::bail;

use super::{RecordingEntry, CALCIUM_KEY};

/// Transforms a full dataset before training.
pub trait Preprocessor {
    /// Return the preprocessed entries.
    ///
    /// # Errors
    ///
    /// Failures propagate to the caller unchanged and abort the run.
    fn preprocess(
        &self,
        entries: Vec<RecordingEntry>,
        verbosity: u8,
    ) -> anyhow::Result<Vec<RecordingEntry>>;
}

/// Z-scores every calcium trace (zero mean, unit variance).
///
/// Constant traces are only centred.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceNormalizer;

impl Preprocessor for TraceNormalizer {
    fn preprocess(
        &self,
        mut entries: Vec<RecordingEntry>,
        verbosity: u8,
    ) -> anyhow::Result<Vec<RecordingEntry>> {
        for (index, entry) in entries.iter_mut().enumerate() {
            let Some(trace) = entry.series(CALCIUM_KEY) else {
                bail!("Entry {index} has no numeric '{CALCIUM_KEY}' trace");
            };
            entry.set_series(CALCIUM_KEY, &normalize(&trace));
            if verbosity > 1 {
                tracing::debug!(index, samples = trace.len(), "normalized trace");
            }
        }
        Ok(entries)
    }
}

#[allow(clippy::cast_precision_loss)]
fn normalize(trace: &[f64]) -> Vec<f64> {
    if trace.is_empty() {
        return Vec::new();
    }
    let n = trace.len() as f64;
    let mean = trace.iter().sum::<f64>() / n;
    let var = trace.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = var.sqrt();
    if std > f64::EPSILON {
        trace.iter().map(|x| (x - mean) / std).collect()
    } else {
        trace.iter().map(|x| x - mean).collect()
    }
}
