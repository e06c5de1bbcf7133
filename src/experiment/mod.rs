//! Experiment artifact schema and storage
//!
//! ```text
//! ExperimentRecord
//!   ├── args            (ExperimentConfig, as supplied)
//!   ├── training_cells  (TrainingSubset)
//!   └── models          (serialized ensemble)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use c2s_train::experiment::{ExperimentStore, OutputTarget};
//!
//! let store = ExperimentStore::new();
//! let record = store.load(OutputTarget::resolve("runs/").artifact_path().as_path())?;
//! println!("{} models", record.models().len());
//! # Ok::<(), c2s_train::Error>(())
//! ```

mod experiment_record;
mod output;
mod store;

pub use experiment_record::{ExperimentRecord, ExperimentRecordBuilder, FORMAT_VERSION};
pub use output::{OutputTarget, DEFAULT_FILENAME};
pub use store::ExperimentStore;
