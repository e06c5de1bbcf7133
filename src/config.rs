//! Experiment configuration
//!
//! [`ExperimentConfig`] is supplied once per run, never mutated, and echoed
//! verbatim into the experiment record. [`TrainingParams`] is the slice of it
//! the trainer sees.
//!
//! The config holds normalised values, not raw command line text. Integer
//! switches become booleans (any non-zero value is `true`), a negative seed
//! becomes `None` and a negative validation count becomes `0`. Two command
//! lines that differ only in those spellings produce the same config and the
//! same record.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::experiment::OutputTarget;
use crate::{Error, Result};

/// Structural parameters of each model in the ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Number of mixture components per model.
    pub num_components: u32,
    /// Number of quadratic features per model.
    pub num_features: u32,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            num_components: 3,
            num_features: 2,
        }
    }
}

/// Parameters forwarded to the optimizer of each model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingParameters {
    /// Optimizer verbosity.
    pub verbosity: u8,
}

impl Default for TrainingParameters {
    fn default() -> Self {
        Self { verbosity: 1 }
    }
}

/// Everything the trainer needs for one ensemble fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Cells held out for validation-based early stopping (0 = none).
    pub num_valid: usize,
    /// Ensemble size.
    pub num_models: usize,
    /// Variance retained by the window dimensionality reduction, in percent.
    pub var_explained: f64,
    /// Window length in milliseconds.
    pub window_length: f64,
    /// Keep every model (`true`) or only the best one.
    pub keep_all: bool,
    /// Run the fine-tuning pass after training.
    pub finetune: bool,
    /// Per-model structural parameters.
    pub model_parameters: ModelParameters,
    /// Optimizer parameters.
    pub training_parameters: TrainingParameters,
    /// Regularization strength.
    pub regularize: f64,
    /// Run-level verbosity.
    pub verbosity: u8,
}

/// Immutable configuration of one training experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Dataset locators, loaded in order.
    pub datasets: Vec<PathBuf>,
    /// Where the experiment artifact goes.
    pub output: OutputTarget,
    /// Per-model structural parameters.
    pub model_parameters: ModelParameters,
    /// Ensemble size.
    pub num_models: usize,
    /// Keep all models instead of the best one.
    pub keep_all: bool,
    /// Enable the fine-tuning pass.
    pub finetune: bool,
    /// Number of training cells (0 or negative = all).
    pub num_train: i64,
    /// Number of validation cells (0 = none; negative input clamps to 0).
    pub num_valid: usize,
    /// Variance explained, in percent.
    pub var_explained: f64,
    /// Window length in milliseconds.
    pub window_length: f64,
    /// Regularization strength.
    pub regularize: f64,
    /// Run the preprocessor on the aggregated data.
    pub preprocess: bool,
    /// RNG seed; `None` draws from OS entropy. Any negative command line
    /// seed maps to `None`.
    pub seed: Option<u64>,
    /// Logging/training verbosity.
    pub verbosity: u8,
}

impl ExperimentConfig {
    /// Create a builder with default hyperparameters.
    #[must_use]
    pub fn builder(output: OutputTarget) -> ExperimentConfigBuilder {
        ExperimentConfigBuilder::new(output)
    }

    /// Check value ranges.
    ///
    /// The dataset list is not checked here; an empty list is handled by the
    /// orchestrator as a graceful early exit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.num_models == 0 {
            return Err(Error::invalid("num_models must be at least 1"));
        }
        if !(self.var_explained > 0.0 && self.var_explained <= 100.0) {
            return Err(Error::invalid(format!(
                "var_explained must be in (0, 100], got {}",
                self.var_explained
            )));
        }
        if !(self.window_length > 0.0 && self.window_length.is_finite()) {
            return Err(Error::invalid(format!(
                "window_length must be positive, got {}",
                self.window_length
            )));
        }
        if !(self.regularize >= 0.0 && self.regularize.is_finite()) {
            return Err(Error::invalid(format!(
                "regularize must be non-negative, got {}",
                self.regularize
            )));
        }
        Ok(())
    }

    /// Parameters handed to the trainer.
    #[must_use]
    pub fn training_params(&self) -> TrainingParams {
        TrainingParams {
            num_valid: self.num_valid,
            num_models: self.num_models,
            var_explained: self.var_explained,
            window_length: self.window_length,
            keep_all: self.keep_all,
            finetune: self.finetune,
            model_parameters: self.model_parameters,
            training_parameters: TrainingParameters::default(),
            regularize: self.regularize,
            verbosity: self.verbosity,
        }
    }
}

/// Builder for `ExperimentConfig`.
#[derive(Debug)]
pub struct ExperimentConfigBuilder {
    config: ExperimentConfig,
}

impl ExperimentConfigBuilder {
    /// Create a builder with the default hyperparameters.
    #[must_use]
    pub fn new(output: OutputTarget) -> Self {
        Self {
            config: ExperimentConfig {
                datasets: Vec::new(),
                output,
                model_parameters: ModelParameters::default(),
                num_models: 4,
                keep_all: true,
                finetune: false,
                num_train: 0,
                num_valid: 0,
                var_explained: 95.0,
                window_length: 1000.0,
                regularize: 0.0,
                preprocess: false,
                seed: None,
                verbosity: 1,
            },
        }
    }

    /// Append a dataset locator.
    #[must_use]
    pub fn dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.datasets.push(path.into());
        self
    }

    /// Replace the dataset list.
    #[must_use]
    pub fn datasets<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.datasets = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the model structure.
    #[must_use]
    pub const fn model_parameters(mut self, num_components: u32, num_features: u32) -> Self {
        self.config.model_parameters = ModelParameters {
            num_components,
            num_features,
        };
        self
    }

    /// Set the ensemble size.
    #[must_use]
    pub const fn num_models(mut self, num_models: usize) -> Self {
        self.config.num_models = num_models;
        self
    }

    /// Keep all models or only the best.
    #[must_use]
    pub const fn keep_all(mut self, keep_all: bool) -> Self {
        self.config.keep_all = keep_all;
        self
    }

    /// Enable or disable fine-tuning.
    #[must_use]
    pub const fn finetune(mut self, finetune: bool) -> Self {
        self.config.finetune = finetune;
        self
    }

    /// Set the number of training cells.
    #[must_use]
    pub const fn num_train(mut self, num_train: i64) -> Self {
        self.config.num_train = num_train;
        self
    }

    /// Set the number of validation cells.
    #[must_use]
    pub const fn num_valid(mut self, num_valid: usize) -> Self {
        self.config.num_valid = num_valid;
        self
    }

    /// Set the variance explained threshold (percent).
    #[must_use]
    pub fn var_explained(mut self, var_explained: f64) -> Self {
        self.config.var_explained = var_explained;
        self
    }

    /// Set the window length (milliseconds).
    #[must_use]
    pub fn window_length(mut self, window_length: f64) -> Self {
        self.config.window_length = window_length;
        self
    }

    /// Set the regularization strength.
    #[must_use]
    pub fn regularize(mut self, regularize: f64) -> Self {
        self.config.regularize = regularize;
        self
    }

    /// Enable preprocessing.
    #[must_use]
    pub const fn preprocess(mut self, preprocess: bool) -> Self {
        self.config.preprocess = preprocess;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set verbosity.
    #[must_use]
    pub const fn verbosity(mut self, verbosity: u8) -> Self {
        self.config.verbosity = verbosity;
        self
    }

    /// Build the `ExperimentConfig`.
    #[must_use]
    pub fn build(self) -> ExperimentConfig {
        self.config
    }
}
