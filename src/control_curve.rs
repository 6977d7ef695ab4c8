//! Laboratory control points and validated recovery-vs-P80 curves.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single laboratory measurement pairing a feed fineness with its recovery.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Particle size below which 80% of the material mass passes.
    pub p80: f64,
    /// Flotation recovery in percent, within [0, 100].
    pub recovery: f64,
}

impl ControlPoint {
    /// Creates a new control point.
    #[inline(always)]
    pub fn new(p80: f64, recovery: f64) -> Self {
        Self { p80, recovery }
    }
}

/// An ordered sequence of at least two control points with strictly
/// increasing p80 values.
///
/// Violations are reported at construction and never silently corrected;
/// callers must supply corrected points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ControlCurveRepr")]
pub struct ControlCurve {
    points: Vec<ControlPoint>,
}

/// Wire form of [`ControlCurve`]; deserialization re-runs the constructor
/// so serialized data cannot bypass the ordering and range checks.
#[derive(Deserialize)]
struct ControlCurveRepr {
    points: Vec<ControlPoint>,
}

impl TryFrom<ControlCurveRepr> for ControlCurve {
    type Error = Error;

    fn try_from(repr: ControlCurveRepr) -> Result<Self> {
        Self::new(repr.points)
    }
}

impl ControlCurve {
    /// Validates and constructs a control curve.
    ///
    /// # Errors
    /// [`Error::InvalidCurve`] when there are fewer than two points, a p80
    /// is not a positive finite value, a recovery is outside [0, 100], or
    /// the p80 values are not strictly increasing.
    pub fn new(points: Vec<ControlPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidCurve(format!(
                "need at least 2 control points, got {}",
                points.len()
            )));
        }
        for point in &points {
            if !point.p80.is_finite() || point.p80 <= 0.0 {
                return Err(Error::InvalidCurve(format!(
                    "p80 must be a positive finite value, got {}",
                    point.p80
                )));
            }
            if !point.recovery.is_finite() || !(0.0..=100.0).contains(&point.recovery) {
                return Err(Error::InvalidCurve(format!(
                    "recovery must be within [0, 100], got {}",
                    point.recovery
                )));
            }
        }
        if points.windows(2).any(|w| w[1].p80 <= w[0].p80) {
            return Err(Error::InvalidCurve(
                "p80 values must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { points })
    }

    /// Validates and constructs a control curve from `(p80, recovery)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(p80, recovery)| ControlPoint::new(p80, recovery))
                .collect(),
        )
    }

    /// Returns the control points in ascending p80 order.
    #[inline(always)]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// The number of control points.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a curve has at least two points.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first (smallest) p80 value.
    #[inline(always)]
    pub fn min_p80(&self) -> f64 {
        self.points[0].p80
    }

    /// The last (largest) p80 value.
    #[inline(always)]
    pub fn max_p80(&self) -> f64 {
        self.points[self.points.len() - 1].p80
    }

    /// The Chuquicamata plant laboratory table.
    pub fn chuquicamata() -> Self {
        Self::template(&[
            (20.0, 30.0),
            (50.0, 66.0),
            (100.0, 90.0),
            (150.0, 90.0),
            (185.0, 76.0),
            (200.0, 66.0),
            (230.0, 35.0),
        ])
    }

    /// The El Salvador plant laboratory table.
    pub fn el_salvador() -> Self {
        Self::template(&[(20.0, 50.0), (65.0, 81.0), (110.0, 80.0), (150.0, 52.0)])
    }

    /// The Disputada plant laboratory table.
    pub fn disputada() -> Self {
        Self::template(&[
            (10.0, 51.0),
            (50.0, 82.0),
            (65.0, 89.0),
            (80.0, 91.0),
            (150.0, 75.0),
            (180.0, 52.0),
        ])
    }

    // Template tables are known-valid constants, so validation is skipped.
    fn template(pairs: &[(f64, f64)]) -> Self {
        Self {
            points: pairs
                .iter()
                .map(|&(p80, recovery)| ControlPoint::new(p80, recovery))
                .collect(),
        }
    }
}

/// Default `(p80, recovery)` node values for a customizable curve of
/// `node_count` points.
///
/// The defaults rise to an 85% recovery plateau around the middle nodes and
/// fall off towards both ends, with p80 values spread over the typical
/// grind-size range. Pure function of the node count; total for
/// `node_count >= 2`.
pub fn default_nodes(node_count: usize) -> Vec<ControlPoint> {
    debug_assert!(node_count >= 2);
    let node_max = node_count - 1;
    let middle_floor = node_max / 2;
    let middle_ceil = node_max.div_ceil(2);

    (0..node_count)
        .map(|i| {
            let j = i + 1;
            let recovery = if i < middle_floor {
                (85.0 * (1.0 - (middle_floor - i) as f64 / node_max as f64)).round()
            } else if i == middle_floor || i == middle_ceil {
                85.0
            } else {
                (85.0 * (1.0 + (middle_floor as f64 - i as f64) / node_max as f64)).round()
            };
            let p80 = if i < middle_ceil {
                (120.0 * (1.0 - (node_max - j) as f64 / node_max as f64)).round()
            } else if i == middle_floor {
                120.0
            } else {
                (120.0 * (0.8 * j as f64 / middle_ceil as f64)).round()
            };
            ControlPoint::new(p80, recovery)
        })
        .collect()
}
