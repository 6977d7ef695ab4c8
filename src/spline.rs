//! Natural cubic spline interpolation over strictly increasing knots.

/// A piecewise-cubic interpolant with zero second derivative at both
/// endpoints and continuous first and second derivatives at interior knots.
///
/// The knot second derivatives are solved once at construction (Thomas
/// algorithm on the tridiagonal system); evaluation is a segment lookup
/// followed by a Horner polynomial evaluation. With two knots the spline
/// degenerates to the chord between them.
#[derive(Clone, Debug)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot; zero at both ends.
    second_derivs: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Fits the spline through the given knots.
    ///
    /// Knots must be strictly increasing with at least two entries;
    /// [`ControlCurve`](crate::control_curve::ControlCurve) enforces this
    /// before construction.
    pub fn fit(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        debug_assert!(xs.len() >= 2 && xs.len() == ys.len());
        debug_assert!(xs.windows(2).all(|w| w[0] < w[1]));

        let n = xs.len();
        let mut second_derivs = vec![0.0; n];

        if n > 2 {
            let rows = n - 2;
            let mut sub = vec![0.0; rows];
            let mut diag = vec![0.0; rows];
            let mut sup = vec![0.0; rows];
            let mut rhs = vec![0.0; rows];

            for r in 0..rows {
                let i = r + 1;
                let h_prev = xs[i] - xs[i - 1];
                let h_next = xs[i + 1] - xs[i];
                sub[r] = h_prev;
                diag[r] = 2.0 * (h_prev + h_next);
                sup[r] = h_next;
                rhs[r] = 6.0 * ((ys[i + 1] - ys[i]) / h_next - (ys[i] - ys[i - 1]) / h_prev);
            }

            // Forward elimination.
            for r in 1..rows {
                let w = sub[r] / diag[r - 1];
                diag[r] -= w * sup[r - 1];
                rhs[r] -= w * rhs[r - 1];
            }

            // Back substitution into the interior knots.
            second_derivs[rows] = rhs[rows - 1] / diag[rows - 1];
            for r in (0..rows - 1).rev() {
                second_derivs[r + 1] = (rhs[r] - sup[r] * second_derivs[r + 2]) / diag[r];
            }
        }

        Self {
            xs,
            ys,
            second_derivs,
        }
    }

    /// The first knot abscissa.
    #[inline(always)]
    pub fn min_x(&self) -> f64 {
        self.xs[0]
    }

    /// The last knot abscissa.
    #[inline(always)]
    pub fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// Segment index whose cubic covers `x`, clamped to the boundary
    /// segments outside the knot span.
    #[inline(always)]
    fn segment(&self, x: f64) -> usize {
        match self.xs.partition_point(|knot| *knot <= x) {
            0 => 0,
            i => (i - 1).min(self.xs.len() - 2),
        }
    }

    /// Interpolated value at `x`.
    ///
    /// Outside the knot span the boundary cubic is extended; callers that
    /// need linear extrapolation replace that region themselves.
    pub fn value(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let t = x - self.xs[i];
        let (m0, m1) = (self.second_derivs[i], self.second_derivs[i + 1]);
        let b = (self.ys[i + 1] - self.ys[i]) / h - h * (2.0 * m0 + m1) / 6.0;
        self.ys[i] + t * (b + t * (m0 / 2.0 + t * (m1 - m0) / (6.0 * h)))
    }

    /// First derivative at `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let h = self.xs[i + 1] - self.xs[i];
        let t = x - self.xs[i];
        let (m0, m1) = (self.second_derivs[i], self.second_derivs[i + 1]);
        let b = (self.ys[i + 1] - self.ys[i]) / h - h * (2.0 * m0 + m1) / 6.0;
        b + t * (m0 + t * (m1 - m0) / (2.0 * h))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fit(points: &[(f64, f64)]) -> NaturalCubicSpline {
        let xs = points.iter().map(|p| p.0).collect();
        let ys = points.iter().map(|p| p.1).collect();
        NaturalCubicSpline::fit(xs, ys)
    }

    #[test]
    fn interpolates_knots_exactly() {
        let points = [
            (20.0, 30.0),
            (50.0, 66.0),
            (100.0, 90.0),
            (150.0, 90.0),
            (185.0, 76.0),
            (200.0, 66.0),
            (230.0, 35.0),
        ];
        let spline = fit(&points);
        for (x, y) in points {
            assert!(
                (spline.value(x) - y).abs() < 1e-9,
                "spline({x}) = {} expected {y}",
                spline.value(x)
            );
        }
    }

    #[test]
    fn two_knots_degenerate_to_chord() {
        let spline = fit(&[(0.0, 0.0), (10.0, 20.0)]);
        assert!((spline.value(5.0) - 10.0).abs() < 1e-12);
        assert!((spline.derivative(2.5) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn linear_data_stays_linear() {
        let spline = fit(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]);
        for i in 0..=30 {
            let x = i as f64 * 0.1;
            assert!((spline.value(x) - (1.0 + 2.0 * x)).abs() < 1e-9);
            assert!((spline.derivative(x) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn natural_boundary_second_derivative_is_zero() {
        let spline = fit(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (4.0, 3.0)]);
        // Central finite difference of the first derivative near each end.
        let eps = 1e-5;
        let d2_left = (spline.derivative(0.0 + eps) - spline.derivative(0.0)) / eps;
        let d2_right = (spline.derivative(4.0) - spline.derivative(4.0 - eps)) / eps;
        assert!(d2_left.abs() < 1e-3, "left second derivative {d2_left}");
        assert!(d2_right.abs() < 1e-3, "right second derivative {d2_right}");
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let spline = fit(&[(20.0, 30.0), (50.0, 66.0), (100.0, 90.0), (150.0, 90.0)]);
        let eps = 1e-6;
        for x in [25.0, 60.0, 99.0, 120.0, 149.0] {
            let numeric = (spline.value(x + eps) - spline.value(x - eps)) / (2.0 * eps);
            assert!(
                (spline.derivative(x) - numeric).abs() < 1e-4,
                "derivative mismatch at {x}"
            );
        }
    }

    #[test]
    fn continuous_across_interior_knots() {
        let spline = fit(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (4.0, 3.0)]);
        for knot in [1.0, 2.0] {
            let eps = 1e-9;
            assert!((spline.value(knot - eps) - spline.value(knot + eps)).abs() < 1e-6);
            assert!((spline.derivative(knot - eps) - spline.derivative(knot + eps)).abs() < 1e-4);
        }
    }
}
