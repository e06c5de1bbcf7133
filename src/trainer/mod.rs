//! Ensemble trainer boundary
//!
//! The orchestrator only knows that a trainer turns a filtered dataset and a
//! set of [`TrainingParams`] into a list of serializable models. Model
//! internals never leak past this trait.

mod rate;

pub use rate::{RateModel, RateTrainer};

use rand::RngCore;
use serde::Serialize;

use crate::config::TrainingParams;
use crate::data::RecordingEntry;

/// Fits an ensemble of models.
pub trait Trainer {
    /// Fitted model type, persisted as part of the experiment record.
    type Model: Serialize;

    /// Fit an ensemble on `entries`.
    ///
    /// Returns `params.num_models` models when `params.keep_all` is set,
    /// otherwise the single best one. All randomness, including the
    /// validation-cell draw for `params.num_valid`, comes from `rng`.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the run and reported unchanged.
    fn train(
        &self,
        entries: &[RecordingEntry],
        params: &TrainingParams,
        rng: &mut dyn RngCore,
    ) -> anyhow::Result<Vec<Self::Model>>;
}
