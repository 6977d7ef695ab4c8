//! Parameter sweep producing a recovery sensitivity surface.

use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use log::info;
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::curve_model::CurveModel;
use crate::error::{Error, Result};
use crate::gaussian::stream_rng;
use crate::simulation::{DistributionParams, P80_FLOOR, simulate};

/// Default number of mean steps across the sweep range.
pub const DEFAULT_STEPS_PER_MEAN: usize = 4;
/// Default number of standard-deviation steps per mean.
pub const DEFAULT_STEPS_PER_STD: usize = 20;

/// Sweep configuration: inclusive parameter ranges and grid resolution.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    /// Inclusive `(min, max)` range of distribution means.
    pub mean_range: (f64, f64),
    /// Inclusive `(min, max)` range of standard deviations.
    pub std_range: (f64, f64),
    /// Number of evenly spaced mean values, both range ends included.
    pub steps_per_mean: usize,
    /// Number of evenly spaced std values per mean, both range ends included.
    pub steps_per_std: usize,
    /// Draws per grid cell.
    pub sample_count: usize,
}

impl SweepParams {
    /// Sweep over the given ranges at the default grid resolution.
    pub fn new(mean_range: (f64, f64), std_range: (f64, f64), sample_count: usize) -> Self {
        Self {
            mean_range,
            std_range,
            steps_per_mean: DEFAULT_STEPS_PER_MEAN,
            steps_per_std: DEFAULT_STEPS_PER_STD,
            sample_count,
        }
    }

    fn validate(&self) -> Result<()> {
        let (mean_min, mean_max) = self.mean_range;
        let (std_min, std_max) = self.std_range;
        if !mean_min.is_finite() || !mean_max.is_finite() || mean_min > mean_max {
            return Err(Error::InvalidParams(format!(
                "mean range ({mean_min}, {mean_max}) must be finite with min <= max"
            )));
        }
        if mean_min < P80_FLOOR {
            return Err(Error::InvalidParams(format!(
                "mean range must not go below the domain floor {P80_FLOOR}, got {mean_min}"
            )));
        }
        if !std_min.is_finite() || !std_max.is_finite() || std_min > std_max || std_min <= 0.0 {
            return Err(Error::InvalidParams(format!(
                "std range ({std_min}, {std_max}) must be finite, strictly positive, with min <= max"
            )));
        }
        if self.steps_per_mean < 1 || self.steps_per_std < 1 {
            return Err(Error::InvalidParams(
                "step counts must be at least 1".to_string(),
            ));
        }
        if self.sample_count < 1 {
            return Err(Error::InvalidParams(
                "sample count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One grid cell outcome.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    pub mean: f64,
    pub std: f64,
    /// `None` when no sample in the cell survived the validity filter;
    /// must not be coerced to zero downstream.
    pub mean_recovery: Option<f64>,
}

/// Rows in canonical grid order: grouped by mean, inner loop over std.
pub type SensitivityTable = Vec<SensitivityRow>;

/// Evenly spaced values across an inclusive range. A single step
/// degenerates to the range minimum.
fn linspace((min, max): (f64, f64), steps: usize) -> Vec<f64> {
    if steps == 1 {
        return vec![min];
    }
    (0..steps)
        .map(|i| min + (max - min) * i as f64 / (steps - 1) as f64)
        .collect()
}

/// Runs one simulation per `(mean, std)` grid cell.
///
/// Cells are independent and run in parallel, each on its own RNG stream
/// derived from `seed` and the cell's grid index. The returned table is in
/// canonical grid order (grouped by mean, inner loop over std) regardless
/// of execution order; downstream grouping-by-mean relies on contiguous
/// slices.
pub fn sweep(curve: &CurveModel, params: &SweepParams, seed: u64) -> Result<SensitivityTable> {
    params.validate()?;

    let means = linspace(params.mean_range, params.steps_per_mean);
    let stds = linspace(params.std_range, params.steps_per_std);
    let cells = means
        .iter()
        .cartesian_product(stds.iter())
        .map(|(&mean, &std)| (mean, std))
        .collect::<Vec<_>>();

    info!(
        "sweeping {} cells ({} means x {} stds, {} samples each)",
        cells.len(),
        means.len(),
        stds.len(),
        params.sample_count
    );

    let total = cells.len() as u64;
    cells
        .into_par_iter()
        .enumerate()
        .progress_count(total)
        .map(|(idx, (mean, std))| {
            // Range validation above guarantees per-cell validity.
            let cell = DistributionParams::new(mean, std, params.sample_count)?;
            let mut rng = stream_rng(seed, idx as u64);
            let result = simulate(curve, &cell, &mut rng);
            Ok(SensitivityRow {
                mean,
                std,
                mean_recovery: result.mean_recovery,
            })
        })
        .collect()
}

/// Contiguous per-mean groups of a table in canonical grid order.
///
/// A `steps_per_std` of zero yields no groups.
pub fn mean_groups(
    table: &SensitivityTable,
    steps_per_std: usize,
) -> impl Iterator<Item = &[SensitivityRow]> {
    // `chunks` rejects a zero size; an empty table covers that case.
    let table = if steps_per_std == 0 { &[] } else { table.as_slice() };
    table.chunks(steps_per_std.max(1))
}
