//! Experiment Record - the persisted result of one training run

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ExperimentConfig;
use crate::partition::TrainingSubset;
use crate::Result;

/// Current on-disk layout of [`ExperimentRecord`].
pub const FORMAT_VERSION: u32 = 1;

/// Experiment Record holds everything needed to reproduce and use a run.
///
/// Serialized as one object with the keys `format_version`, `args`,
/// `training_cells` and `models`, plus `created_at` when a timestamp was set.
/// Created once per run and never mutated afterwards.
///
/// A record without a timestamp depends only on its inputs, so equal inputs
/// serialize to equal bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    format_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    args: ExperimentConfig,
    training_cells: TrainingSubset,
    models: Vec<serde_json::Value>,
}

impl ExperimentRecord {
    /// Create a record from the run configuration, the selected cells and
    /// the trained ensemble.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if a model cannot be
    /// represented as JSON.
    pub fn new<M: Serialize>(
        args: ExperimentConfig,
        training_cells: TrainingSubset,
        models: &[M],
    ) -> Result<Self> {
        Ok(Self::builder(args, training_cells).models(models)?.build())
    }

    /// Create a builder for constructing a record with optional fields.
    #[must_use]
    pub fn builder(
        args: ExperimentConfig,
        training_cells: TrainingSubset,
    ) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(args, training_cells)
    }

    /// Get the layout version.
    #[must_use]
    pub const fn format_version(&self) -> u32 {
        self.format_version
    }

    /// Get the creation timestamp, if one was recorded.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Get the configuration the run was started with.
    #[must_use]
    pub const fn args(&self) -> &ExperimentConfig {
        &self.args
    }

    /// Get the cells used for training.
    #[must_use]
    pub const fn training_cells(&self) -> &TrainingSubset {
        &self.training_cells
    }

    /// Get the serialized models.
    #[must_use]
    pub fn models(&self) -> &[serde_json::Value] {
        &self.models
    }

    /// Decode the models into a concrete model type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if the stored models do not
    /// match `M`.
    pub fn models_as<M: DeserializeOwned>(&self) -> Result<Vec<M>> {
        self.models
            .iter()
            .map(|m| serde_json::from_value(m.clone()).map_err(Into::into))
            .collect()
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    args: ExperimentConfig,
    training_cells: TrainingSubset,
    created_at: Option<DateTime<Utc>>,
    models: Vec<serde_json::Value>,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(args: ExperimentConfig, training_cells: TrainingSubset) -> Self {
        Self {
            args,
            training_cells,
            created_at: None,
            models: Vec::new(),
        }
    }

    /// Set the trained models.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if a model cannot be
    /// represented as JSON.
    pub fn models<M: Serialize>(mut self, models: &[M]) -> Result<Self> {
        self.models = models
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<_, _>>()?;
        Ok(self)
    }

    /// Stamp the record with a creation time.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        ExperimentRecord {
            format_version: FORMAT_VERSION,
            created_at: self.created_at,
            args: self.args,
            training_cells: self.training_cells,
            models: self.models,
        }
    }
}
