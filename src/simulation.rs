//! Monte Carlo simulation of recovery over a Gaussian P80 distribution.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::curve_model::CurveModel;
use crate::error::{Error, Result};
use crate::gaussian::{draw_normal, seeded_rng};

/// Fixed fines floor: a simulated P80 below this value is not physically
/// representable and is discarded regardless of the curve's own lower
/// extrapolation root.
pub const P80_FLOOR: f64 = 35.0;

/// Parameters of the Gaussian P80 distribution to sample from.
///
/// Caller-owned and never mutated by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionParamsRepr")]
pub struct DistributionParams {
    mean: f64,
    std: f64,
    sample_count: usize,
}

/// Wire form of [`DistributionParams`]; deserialization re-runs the
/// constructor so serialized data cannot bypass the range checks.
#[derive(Deserialize)]
struct DistributionParamsRepr {
    mean: f64,
    std: f64,
    sample_count: usize,
}

impl TryFrom<DistributionParamsRepr> for DistributionParams {
    type Error = Error;

    fn try_from(repr: DistributionParamsRepr) -> Result<Self> {
        Self::new(repr.mean, repr.std, repr.sample_count)
    }
}

impl DistributionParams {
    /// Validates and constructs the distribution parameters.
    ///
    /// # Errors
    /// [`Error::InvalidParams`] when the mean is below [`P80_FLOOR`] or not
    /// finite, the standard deviation is not strictly positive, or the
    /// sample count is zero.
    pub fn new(mean: f64, std: f64, sample_count: usize) -> Result<Self> {
        if !mean.is_finite() || mean < P80_FLOOR {
            return Err(Error::InvalidParams(format!(
                "mean must be a finite value >= {P80_FLOOR}, got {mean}"
            )));
        }
        if !std.is_finite() || std <= 0.0 {
            return Err(Error::InvalidParams(format!(
                "standard deviation must be strictly positive, got {std}"
            )));
        }
        if sample_count < 1 {
            return Err(Error::InvalidParams(
                "sample count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            mean,
            std,
            sample_count,
        })
    }

    /// Distribution mean.
    #[inline(always)]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Distribution standard deviation.
    #[inline(always)]
    pub fn std(&self) -> f64 {
        self.std
    }

    /// Number of independent draws per simulation.
    #[inline(always)]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

/// A single simulated draw and the recovery it maps to.
///
/// `recovery` is `None` when the draw fell outside the representable P80
/// domain (below [`P80_FLOOR`] or above the curve's upper domain limit).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatedSample {
    pub p80: f64,
    pub recovery: Option<f64>,
}

/// Outcome of one simulation run; a value object owned by the caller,
/// created fresh per call with no engine-side caching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Every draw, in generation order, invalid draws included.
    pub samples: Vec<SimulatedSample>,
    /// Number of samples that contributed to the mean.
    pub valid_count: usize,
    /// Arithmetic mean of the kept recoveries, rounded to two decimal
    /// places; `None` when no sample survived the validity filter. Zero is
    /// a valid recovery, distinct from "no data".
    pub mean_recovery: Option<f64>,
}

/// Rounds to two decimal places.
#[inline(always)]
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Runs one Monte Carlo simulation over the given curve.
///
/// Draws `params.sample_count()` independent values from
/// `Normal(mean, std)` via inverse-CDF sampling, discards draws below
/// [`P80_FLOOR`] or above [`CurveModel::upper_domain_limit`], maps the rest
/// through [`CurveModel::recovery_at`], and averages the recoveries that
/// evaluate to a positive number.
pub fn simulate<R: Rng>(
    curve: &CurveModel,
    params: &DistributionParams,
    rng: &mut R,
) -> SimulationResult {
    let upper = curve.upper_domain_limit();

    let mut samples = Vec::with_capacity(params.sample_count());
    let mut kept = 0usize;
    let mut sum = 0.0;

    for _ in 0..params.sample_count() {
        let p80 = draw_normal(rng, params.mean(), params.std());
        let recovery = if p80 < P80_FLOOR || p80 > upper {
            None
        } else {
            Some(curve.recovery_at(p80))
        };
        if let Some(r) = recovery
            && r > 0.0
        {
            kept += 1;
            sum += r;
        }
        samples.push(SimulatedSample { p80, recovery });
    }

    let mean_recovery = (kept > 0).then(|| round2(sum / kept as f64));
    debug!(
        "simulated {} draws (mean {}, std {}): {} valid, mean recovery {:?}",
        samples.len(),
        params.mean(),
        params.std(),
        kept,
        mean_recovery
    );

    SimulationResult {
        samples,
        valid_count: kept,
        mean_recovery,
    }
}

/// Deterministic entry point: runs [`simulate`] on a seeded RNG stream.
pub fn simulate_seeded(
    curve: &CurveModel,
    params: &DistributionParams,
    seed: u64,
) -> SimulationResult {
    simulate(curve, params, &mut seeded_rng(seed))
}
