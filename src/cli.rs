//! Command line interface
//!
//! Trains an ensemble for spike prediction from calcium traces.
//!
//! ```text
//! c2s-train -p 1 data.json runs/
//! c2s-train -m 8 -k 0 -S 42 cell_a.json cell_b.json model.xpck
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::ExperimentConfig;
use crate::experiment::OutputTarget;

/// Parsed command line.
#[derive(Parser, Debug, Clone)]
#[command(name = "c2s-train")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Trains model ensembles for the prediction of spikes from calcium traces")]
pub struct Cli {
    /// Dataset(s) used for training, followed by the directory or file where
    /// trained models will be stored
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Number of components used in each model
    #[arg(short = 'c', long, default_value_t = 3)]
    pub num_components: u32,

    /// Number of quadratic features used in each model
    #[arg(short = 'f', long, default_value_t = 2)]
    pub num_features: u32,

    /// Number of models trained (predictions are averaged across models)
    #[arg(short = 'm', long, default_value_t = 4)]
    pub num_models: usize,

    /// If set to 0, only the best of all trained models is kept
    #[arg(short = 'k', long, default_value_t = 1)]
    pub keep_all: u8,

    /// If set to 1, a fine-tuning step runs after training
    #[arg(short = 'n', long, default_value_t = 0)]
    pub finetune: u8,

    /// If positive, a random subset of this many cells is used for training
    #[arg(short = 't', long, default_value_t = 0, allow_negative_numbers = true)]
    pub num_train: i64,

    /// If positive, a random subset of this many cells is used for early stopping
    #[arg(short = 's', long, default_value_t = 0, allow_negative_numbers = true)]
    pub num_valid: i64,

    /// Degree of dimensionality reduction of fluorescence windows (percent)
    #[arg(short = 'e', long, default_value_t = 95.0)]
    pub var_explained: f64,

    /// Length of windows extracted from the calcium signal (milliseconds)
    #[arg(short = 'w', long, default_value_t = 1000.0)]
    pub window_length: f64,

    /// Amount of parameter regularization
    #[arg(short = 'r', long, default_value_t = 0.0)]
    pub regularize: f64,

    /// If set to 1, the data is preprocessed before training
    #[arg(short = 'p', long, default_value_t = 0)]
    pub preprocess: u8,

    /// RNG seed (-1 leaves the generator unseeded)
    #[arg(short = 'S', long, default_value_t = -1, allow_negative_numbers = true)]
    pub seed: i64,

    /// Verbosity (0 = warnings only, 1 = progress, 2+ = debug)
    #[arg(short = 'v', long, default_value_t = 1)]
    pub verbosity: u8,
}

impl Cli {
    /// Dataset paths (every positional except the last).
    #[must_use]
    pub fn datasets(&self) -> &[PathBuf] {
        match self.paths.split_last() {
            Some((_, datasets)) => datasets,
            None => &[],
        }
    }

    /// Output target (the last positional), resolved against the filesystem.
    #[must_use]
    pub fn output(&self) -> OutputTarget {
        self.paths
            .last()
            .map_or_else(|| OutputTarget::Directory(PathBuf::from(".")), OutputTarget::resolve)
    }

    /// Build the experiment configuration.
    ///
    /// Integer switches are read as booleans (non-zero is on), a negative
    /// seed leaves the run unseeded and a non-positive `num_valid` disables
    /// validation.
    #[must_use]
    pub fn into_config(self) -> ExperimentConfig {
        let output = self.output();
        let mut builder = ExperimentConfig::builder(output)
            .datasets(self.datasets().to_vec())
            .model_parameters(self.num_components, self.num_features)
            .num_models(self.num_models)
            .keep_all(self.keep_all != 0)
            .finetune(self.finetune != 0)
            .num_train(self.num_train)
            .num_valid(usize::try_from(self.num_valid.max(0)).unwrap_or(usize::MAX))
            .var_explained(self.var_explained)
            .window_length(self.window_length)
            .regularize(self.regularize)
            .preprocess(self.preprocess != 0)
            .verbosity(self.verbosity);
        if let Ok(seed) = u64::try_from(self.seed) {
            builder = builder.seed(seed);
        }
        builder.build()
    }
}
