//! Recording entries and dataset loading
//!
//! A [`RecordingEntry`] is one calcium trace plus whatever spike/label data
//! and metadata the loader provides. Apart from `cell_num` the schema is
//! owned by the loader and preprocessor, so everything else is kept as an
//! opaque JSON map.
//!
//! ## Dataset format (`JsonDatasetLoader`)
//!
//! ```text
//! [
//!   {"cell_num": 0, "fps": 100.0, "calcium": [..], "spikes": [..]},
//!   {"cell_num": 0, "fps": 100.0, "calcium": [..], "spikes": [..]}
//! ]
//! ```

mod preprocess;

pub use preprocess::{Preprocessor, TraceNormalizer};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the fluorescence trace.
pub const CALCIUM_KEY: &str = "calcium";

/// Field holding the per-bin spike counts.
pub const SPIKES_KEY: &str = "spikes";

/// One calcium recording with its metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cell_num: Option<i64>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl RecordingEntry {
    /// Create an entry with no cell number and no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell number (builder style).
    #[must_use]
    pub const fn with_cell_num(mut self, cell_num: i64) -> Self {
        self.cell_num = Some(cell_num);
        self
    }

    /// Set an arbitrary field (builder style).
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set a numeric series field (builder style).
    #[must_use]
    pub fn with_series(mut self, key: impl Into<String>, values: &[f64]) -> Self {
        self.set_series(key, values);
        self
    }

    /// Get the cell number, if present.
    #[must_use]
    pub const fn cell_num(&self) -> Option<i64> {
        self.cell_num
    }

    /// Overwrite the cell number.
    pub fn set_cell_num(&mut self, cell_num: i64) {
        self.cell_num = Some(cell_num);
    }

    /// Get a field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Read a field as a numeric series.
    ///
    /// Returns `None` if the field is missing, not an array, or contains a
    /// non-numeric element.
    #[must_use]
    pub fn series(&self, key: &str) -> Option<Vec<f64>> {
        self.fields
            .get(key)?
            .as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }

    /// Store a numeric series under `key`.
    pub fn set_series(&mut self, key: impl Into<String>, values: &[f64]) {
        let array = values.iter().copied().map(Value::from).collect();
        self.fields.insert(key.into(), Value::Array(array));
    }
}

/// Source of recording entries for one dataset locator.
pub trait DatasetLoader {
    /// Load every entry stored at `path`, in stored order.
    ///
    /// # Errors
    ///
    /// Any failure is reported as-is to the orchestrator, which treats it as
    /// fatal for the run.
    fn load(&self, path: &Path) -> anyhow::Result<Vec<RecordingEntry>>;
}

/// Loads datasets stored as a JSON array of entry objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDatasetLoader;

impl DatasetLoader for JsonDatasetLoader {
    fn load(&self, path: &Path) -> anyhow::Result<Vec<RecordingEntry>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?;
        let entries: Vec<RecordingEntry> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded dataset");
        Ok(entries)
    }
}
