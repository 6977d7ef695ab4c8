//! Fitted recovery curve: spline interior with linear extrapolation rays.

use serde::Serialize;

use crate::control_curve::{ControlCurve, ControlPoint};
use crate::error::Result;
use crate::spline::NaturalCubicSpline;

/// A linear extrapolation ray anchored at a boundary knot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ExtrapolationRay {
    /// Slope of the ray, taken from the spline first derivative at the anchor knot.
    pub slope: f64,
    /// Intercept so the ray passes through the anchor knot.
    pub intercept: f64,
    /// p80 at which the ray crosses zero recovery. Infinite for a flat ray
    /// (IEEE division), signed by the intercept.
    pub root: f64,
}

impl ExtrapolationRay {
    fn through(anchor: ControlPoint, slope: f64) -> Self {
        let intercept = anchor.recovery - slope * anchor.p80;
        let root = -intercept / slope;
        Self {
            slope,
            intercept,
            root,
        }
    }

    /// Recovery on the ray at `p80`. Unbounded growth or decay beyond the
    /// extrapolation domain.
    #[inline(always)]
    pub fn value_at(&self, p80: f64) -> f64 {
        self.slope * p80 + self.intercept
    }
}

/// An immutable fitted curve, shared read-only by all simulators for the
/// lifetime of one analysis session.
///
/// Rebuilt from scratch whenever the control points change; evaluation is a
/// pure function with no interior mutability, so `&CurveModel` can be read
/// concurrently without synchronization.
#[derive(Clone, Debug)]
pub struct CurveModel {
    curve: ControlCurve,
    spline: NaturalCubicSpline,
    left: ExtrapolationRay,
    right: ExtrapolationRay,
}

impl CurveModel {
    /// Fits the interior spline and derives both extrapolation rays.
    ///
    /// # Errors
    /// [`Error::InvalidCurve`](crate::error::Error::InvalidCurve) is never
    /// produced here directly; curve validity is enforced by
    /// [`ControlCurve::new`]. The `Result` keeps the public seam uniform
    /// with [`CurveModel::from_points`].
    pub fn build(curve: ControlCurve) -> Result<Self> {
        let xs: Vec<f64> = curve.points().iter().map(|p| p.p80).collect();
        let ys: Vec<f64> = curve.points().iter().map(|p| p.recovery).collect();
        let spline = NaturalCubicSpline::fit(xs, ys);

        let first = curve.points()[0];
        let last = curve.points()[curve.len() - 1];
        let left = ExtrapolationRay::through(first, spline.derivative(first.p80));
        let right = ExtrapolationRay::through(last, spline.derivative(last.p80));

        Ok(Self {
            curve,
            spline,
            left,
            right,
        })
    }

    /// Validates the points and fits the model in one step.
    pub fn from_points(points: Vec<ControlPoint>) -> Result<Self> {
        Self::build(ControlCurve::new(points)?)
    }

    /// Recovery at the given p80.
    ///
    /// Inside the knot span the cubic interpolant is evaluated; below the
    /// first knot the left ray applies, above the last knot the right ray.
    /// Pure, deterministic, and total over all p80.
    pub fn recovery_at(&self, p80: f64) -> f64 {
        if p80 < self.spline.min_x() {
            self.left.value_at(p80)
        } else if p80 > self.spline.max_x() {
            self.right.value_at(p80)
        } else {
            self.spline.value(p80)
        }
    }

    /// p80 at which the left ray crosses zero recovery.
    ///
    /// Retained to flag physically meaningless negative-recovery samples,
    /// but NOT applied as a sample filter; the fixed floor
    /// [`P80_FLOOR`](crate::simulation::P80_FLOOR) is an independent lower
    /// bound. A left ray that never crosses zero to the left yields
    /// negative infinity.
    pub fn lower_domain_limit(&self) -> f64 {
        if self.left.slope <= 0.0 {
            f64::NEG_INFINITY
        } else {
            self.left.root
        }
    }

    /// p80 at which the right ray returns to zero recovery — the
    /// authoritative upper cutoff for sample validity.
    ///
    /// A right ray that never returns to zero (non-negative slope) yields
    /// positive infinity, i.e. no upper cutoff.
    pub fn upper_domain_limit(&self) -> f64 {
        if self.right.slope >= 0.0 {
            f64::INFINITY
        } else {
            self.right.root
        }
    }

    /// The control curve the model was fitted through.
    #[inline(always)]
    pub fn curve(&self) -> &ControlCurve {
        &self.curve
    }

    /// The knot span `[first p80, last p80]` covered by the interpolant.
    #[inline(always)]
    pub fn knot_span(&self) -> (f64, f64) {
        (self.spline.min_x(), self.spline.max_x())
    }

    /// The left extrapolation ray.
    #[inline(always)]
    pub fn left_ray(&self) -> ExtrapolationRay {
        self.left
    }

    /// The right extrapolation ray.
    #[inline(always)]
    pub fn right_ray(&self) -> ExtrapolationRay {
        self.right
    }
}
