//! Bootstrap spike-rate ensemble
//!
//! Reference trainer: each ensemble member is a constant firing-rate model
//! fitted on a bootstrap resample of the training traces. It honours the full
//! trainer contract (validation split, keep-best, fine-tuning,
//! regularization) so runs are meaningful end-to-end.

use anyhow::{bail, Context};
use rand::{Rng, RngCore};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::Trainer;
use crate::config::{ModelParameters, TrainingParams};
use crate::data::{RecordingEntry, SPIKES_KEY};
use crate::partition::random_select;
use crate::registry::CellIds;
use crate::rng::ExperimentRng;

/// One fitted ensemble member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateModel {
    /// Expected spikes per bin.
    pub rate: f64,
    /// Mean squared error on the evaluation bins.
    pub loss: f64,
    /// Whether the fine-tuning pass ran.
    pub finetuned: bool,
    /// Structure requested for the model.
    pub model_parameters: ModelParameters,
    /// Window length the model was fitted for (ms).
    pub window_length: f64,
    /// Variance explained threshold (percent).
    pub var_explained: f64,
}

/// Fits [`RateModel`] ensembles.
#[derive(Debug, Default, Clone, Copy)]
pub struct RateTrainer;

/// Spike trains of the cells used for fitting and for scoring.
struct Split {
    train: Vec<Vec<f64>>,
    eval: Vec<Vec<f64>>,
}

impl Trainer for RateTrainer {
    type Model = RateModel;

    fn train(
        &self,
        entries: &[RecordingEntry],
        params: &TrainingParams,
        rng: &mut dyn RngCore,
    ) -> anyhow::Result<Vec<RateModel>> {
        if params.num_models == 0 {
            bail!("num_models must be at least 1");
        }
        let split = split_validation(entries, params.num_valid, rng)?;
        let full_rate = rate_of(split.train.iter(), 0.0);
        let base = rng.next_u64();

        let fit = |member: usize| {
            let mut stream = ExperimentRng::stream(base, member as u64);
            fit_member(&split, params, full_rate, &mut stream)
        };

        #[cfg(feature = "parallel")]
        let mut models: Vec<RateModel> = (0..params.num_models).into_par_iter().map(fit).collect();
        #[cfg(not(feature = "parallel"))]
        let mut models: Vec<RateModel> = (0..params.num_models).map(fit).collect();

        if params.verbosity > 0 {
            for (member, model) in models.iter().enumerate() {
                tracing::info!(member, rate = model.rate, loss = model.loss, "fitted model");
            }
        }

        if !params.keep_all {
            let best = models
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.loss.total_cmp(&b.loss))
                .map(|(i, _)| i)
                .context("ensemble is empty")?;
            models = vec![models.swap_remove(best)];
        }
        Ok(models)
    }
}

fn split_validation(
    entries: &[RecordingEntry],
    num_valid: usize,
    rng: &mut dyn RngCore,
) -> anyhow::Result<Split> {
    let cell_ids = CellIds::collect(entries)?;
    if num_valid > 0 && num_valid >= cell_ids.len() {
        bail!(
            "num_valid ({num_valid}) must be smaller than the number of training cells ({})",
            cell_ids.len()
        );
    }

    let valid_cells: Vec<i64> = if num_valid > 0 {
        random_select(num_valid, cell_ids.len(), rng)?
            .into_iter()
            .filter_map(|i| cell_ids.get(i))
            .collect()
    } else {
        Vec::new()
    };

    let mut train = Vec::new();
    let mut eval = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let spikes = entry
            .series(SPIKES_KEY)
            .with_context(|| format!("Entry {index} has no numeric '{SPIKES_KEY}' train"))?;
        let is_valid = entry.cell_num().is_some_and(|c| valid_cells.contains(&c));
        if is_valid {
            eval.push(spikes);
        } else {
            train.push(spikes);
        }
    }

    if train.iter().all(Vec::is_empty) {
        bail!("no spike bins available for training");
    }
    if eval.is_empty() {
        eval.clone_from(&train);
    }
    Ok(Split { train, eval })
}

fn fit_member(
    split: &Split,
    params: &TrainingParams,
    full_rate: f64,
    rng: &mut impl Rng,
) -> RateModel {
    let n = split.train.len();
    let sample = (0..n).map(|_| &split.train[rng.gen_range(0..n)]);
    let mut rate = rate_of(sample, params.regularize);
    if params.finetune {
        rate = 0.5 * (rate + full_rate);
    }
    RateModel {
        rate,
        loss: mean_squared_error(rate, &split.eval),
        finetuned: params.finetune,
        model_parameters: params.model_parameters,
        window_length: params.window_length,
        var_explained: params.var_explained,
    }
}

#[allow(clippy::cast_precision_loss)]
fn rate_of<'a>(trains: impl Iterator<Item = &'a Vec<f64>>, regularize: f64) -> f64 {
    let (spikes, bins) = trains.fold((0.0, 0usize), |(s, b), train| {
        (s + train.iter().sum::<f64>(), b + train.len())
    });
    let denom = bins as f64 + regularize;
    if denom > 0.0 {
        spikes / denom
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean_squared_error(rate: f64, trains: &[Vec<f64>]) -> f64 {
    let (sum, count) = trains
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), x| (s + (x - rate).powi(2), c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
