//! Experiment orchestrator
//!
//! One run, start to finish, on the calling thread:
//!
//! ```text
//! datasets ─load─> entries ─preprocess?─> registry ─> partition ─> filter
//!          ─> trainer ─> ExperimentRecord ─> ExperimentStore
//! ```
//!
//! Collaborator failures are not retried or translated; they end the run.
//! An empty dataset list ends it early with [`Error::NoDatasets`] before any
//! loading, sampling or writing happens.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;

use crate::config::ExperimentConfig;
use crate::data::{DatasetLoader, JsonDatasetLoader, Preprocessor, RecordingEntry, TraceNormalizer};
use crate::experiment::{ExperimentRecord, ExperimentStore};
use crate::partition::TrainingSubset;
use crate::registry;
use crate::rng::ExperimentRng;
use crate::trainer::{RateTrainer, Trainer};
use crate::{Error, Result};

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// The persisted record.
    pub record: ExperimentRecord,
}

/// Drives loading, cell selection, training and persistence.
#[derive(Debug)]
pub struct Orchestrator<L, P, T> {
    loader: L,
    preprocessor: P,
    trainer: T,
    store: ExperimentStore,
}

impl Default for Orchestrator<JsonDatasetLoader, TraceNormalizer, RateTrainer> {
    fn default() -> Self {
        Self::new(JsonDatasetLoader, TraceNormalizer, RateTrainer)
    }
}

impl<L, P, T> Orchestrator<L, P, T>
where
    L: DatasetLoader,
    P: Preprocessor,
    T: Trainer,
{
    /// Create an orchestrator from its collaborators.
    #[must_use]
    pub const fn new(loader: L, preprocessor: P, trainer: T) -> Self {
        Self {
            loader,
            preprocessor,
            trainer,
            store: ExperimentStore::new(),
        }
    }

    /// Get the trainer.
    #[must_use]
    pub const fn trainer(&self) -> &T {
        &self.trainer
    }

    /// Run one experiment and persist it.
    ///
    /// # Errors
    ///
    /// - [`Error::NoDatasets`] if `config.datasets` is empty (graceful).
    /// - [`Error::InvalidArgument`] for bad hyperparameters, an empty
    ///   aggregated dataset or `num_train` above the number of cells.
    /// - [`Error::MissingCellNum`] for partially labelled datasets.
    /// - [`Error::Collaborator`] for loading, preprocessing or training
    ///   failures.
    /// - [`Error::Io`] / [`Error::Serialization`] if the artifact cannot be
    ///   written.
    pub fn run(&self, config: &ExperimentConfig) -> Result<RunOutcome> {
        if config.datasets.is_empty() {
            tracing::warn!("no datasets given, nothing to train");
            return Err(Error::NoDatasets);
        }
        config.validate()?;

        let span = tracing::info_span!("experiment", seed = ?config.seed);
        let _guard = span.enter();
        let started = Instant::now();

        let mut rng = ExperimentRng::new(config.seed);

        let entries = self.aggregate(config)?;
        let (training_cells, training_data) = prepare_training_data(entries, config.num_train, &mut rng)?;

        tracing::info!(
            cells = training_cells.len(),
            entries = training_data.len(),
            num_models = config.num_models,
            "training ensemble"
        );
        let models = self
            .trainer
            .train(&training_data, &config.training_params(), &mut rng)
            .map_err(Error::Collaborator)?;

        // Seeded runs stay free of wall-clock data so their artifacts are
        // byte-for-byte reproducible.
        let mut builder = ExperimentRecord::builder(config.clone(), training_cells).models(&models)?;
        if config.seed.is_none() {
            builder = builder.created_at(Utc::now());
        }
        let record = builder.build();
        let path = self.store.save(&config.output, &record)?;

        tracing::info!(
            path = %path.display(),
            elapsed_ms = started.elapsed().as_millis(),
            "experiment complete"
        );
        Ok(RunOutcome { path, record })
    }

    /// Load every dataset in order and optionally preprocess the result.
    fn aggregate(&self, config: &ExperimentConfig) -> Result<Vec<RecordingEntry>> {
        let mut entries = Vec::new();
        for path in &config.datasets {
            let loaded = self.loader.load(path).map_err(Error::Collaborator)?;
            tracing::info!(path = %path.display(), entries = loaded.len(), "loaded dataset");
            entries.extend(loaded);
        }

        if config.preprocess {
            entries = self
                .preprocessor
                .preprocess(entries, config.verbosity)
                .map_err(Error::Collaborator)?;
            tracing::info!(entries = entries.len(), "preprocessed dataset");
        }

        if entries.is_empty() {
            return Err(Error::invalid("datasets contain no entries"));
        }
        Ok(entries)
    }
}

/// Register cells, pick the training subset and keep only its entries.
///
/// # Errors
///
/// Returns [`Error::MissingCellNum`] for partially labelled data and
/// [`Error::InvalidArgument`] if `num_train` exceeds the number of cells.
pub fn prepare_training_data(
    mut entries: Vec<RecordingEntry>,
    num_train: i64,
    rng: &mut ExperimentRng,
) -> Result<(TrainingSubset, Vec<RecordingEntry>)> {
    let cell_ids = registry::register(&mut entries)?;
    let subset = TrainingSubset::select(num_train, &cell_ids, rng)?;
    tracing::debug!(
        available = cell_ids.len(),
        selected = subset.len(),
        "selected training cells"
    );
    let training_data = subset.select_entries(entries);
    Ok((subset, training_data))
}
