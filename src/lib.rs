//! # c2s-train: Training Experiment Orchestrator
//!
//! Trains ensembles of spike-prediction models on calcium-fluorescence
//! recordings and stores each run as a single reproducible artifact.
//!
//! ## Pipeline
//!
//! - **Cell registry**: every entry gets a `cell_num` (positional if the
//!   first entry has none), then the sorted distinct cells are collected
//! - **Partition selector**: a seeded, without-replacement draw of training
//!   cells (or all cells)
//! - **Trainer**: opaque ensemble fit behind the [`trainer::Trainer`] trait
//! - **Experiment store**: config + training cells + models, written
//!   atomically to `model.xpck` or an explicit file
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use c2s_train::experiment::OutputTarget;
//! use c2s_train::{ExperimentConfig, Orchestrator};
//!
//! let config = ExperimentConfig::builder(OutputTarget::resolve("runs/"))
//!     .dataset("data/cells.json")
//!     .num_train(10)
//!     .seed(42)
//!     .build();
//!
//! let outcome = Orchestrator::default().run(&config)?;
//! println!("{} models -> {}", outcome.record.models().len(), outcome.path.display());
//! # Ok::<(), c2s_train::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod experiment;
pub mod logging;
pub mod orchestrator;
pub mod partition;
pub mod registry;
pub mod rng;
pub mod trainer;

pub use config::ExperimentConfig;
pub use error::{Error, ErrorKind, Result};
pub use orchestrator::{Orchestrator, RunOutcome};
