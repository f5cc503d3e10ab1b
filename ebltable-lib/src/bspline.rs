//! Interpolating B-splines (smoothing factor zero).
//!
//! Knots are placed the way FITPACK places them for interpolation: `k + 1`
//! coincident boundary knots at each end, interior knots on the data points
//! for odd degree and halfway between neighbouring data points for even
//! degree. This gives exactly one coefficient per data point, so the spline
//! passes through every sample.

use nalgebra::{DMatrix, DVector};

use crate::error::{Axis, EblError, Result};

/// Highest supported spline degree.
pub const MAX_DEGREE: usize = 5;

/// A one-dimensional interpolating B-spline.
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline {
    knots: Vec<f64>,
    coeffs: DVector<f64>,
    degree: usize,
}

impl BSpline {
    /// Build the spline of degree `degree` through `(x, y)`.
    ///
    /// `x` must be strictly increasing with more than `degree` points.
    pub fn interpolate(x: &[f64], y: &[f64], degree: usize, axis: Axis) -> Result<Self> {
        validate_axis(x, degree, axis)?;
        if y.len() != x.len() {
            return Err(EblError::Shape {
                expected: (x.len(), 1),
                found: (y.len(), 1),
            });
        }

        let knots = interpolation_knots(x, degree);
        let coeffs = collocation_matrix(&knots, degree, x)
            .lu()
            .solve(&DVector::from_column_slice(y))
            .ok_or(EblError::Singular(axis))?;

        Ok(Self {
            knots,
            coeffs,
            degree,
        })
    }

    /// Evaluate at `x`.
    ///
    /// Outside the data range the boundary polynomial pieces are extended
    /// when `extrapolate` is set; otherwise `x` is clamped to the range.
    pub fn evaluate(&self, x: f64, extrapolate: bool) -> f64 {
        let (first, b) = basis(&self.knots, self.degree, x, !extrapolate);
        (0..=self.degree).map(|r| b[r] * self.coeffs[first + r]).sum()
    }
}

/// Check that `x` can carry an interpolating spline of degree `degree`.
pub(crate) fn validate_axis(x: &[f64], degree: usize, axis: Axis) -> Result<()> {
    if degree == 0 || degree > MAX_DEGREE {
        return Err(EblError::InvalidDegree { axis, degree });
    }
    if x.len() <= degree {
        return Err(EblError::TooFewPoints {
            axis,
            points: x.len(),
            degree,
        });
    }
    if let Some(i) = x.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(EblError::NotIncreasing { axis, index: i + 1 });
    }
    Ok(())
}

/// Knot vector of length `x.len() + k + 1` for interpolation through `x`.
pub(crate) fn interpolation_knots(x: &[f64], k: usize) -> Vec<f64> {
    let m = x.len();
    let half = k / 2;
    let mut knots = Vec::with_capacity(m + k + 1);
    knots.extend(std::iter::repeat_n(x[0], k + 1));
    for l in 0..m - k - 1 {
        let t = if k % 2 == 1 {
            x[l + half + 1]
        } else {
            0.5 * (x[l + half] + x[l + half + 1])
        };
        knots.push(t);
    }
    knots.extend(std::iter::repeat_n(x[m - 1], k + 1));
    knots
}

/// Non-zero B-spline basis values at `x`.
///
/// Returns the index of the first non-zero basis function and the `k + 1`
/// values starting there (Cox-de Boor recursion). With `clamp` set, `x` is
/// first restricted to `[t[k], t[n - k - 1]]`.
pub(crate) fn basis(
    knots: &[f64],
    k: usize,
    x: f64,
    clamp: bool,
) -> (usize, [f64; MAX_DEGREE + 1]) {
    let n = knots.len();
    let lo = knots[k];
    let hi = knots[n - k - 1];
    let x = if clamp { x.clamp(lo, hi) } else { x };

    // interval l with t[l] <= x < t[l + 1], restricted to the spline's support
    let l = knots
        .partition_point(|&t| t <= x)
        .saturating_sub(1)
        .clamp(k, n - k - 2);

    let mut h = [0.0_f64; MAX_DEGREE + 1];
    let mut hh = [0.0_f64; MAX_DEGREE + 1];
    h[0] = 1.0;
    for j in 1..=k {
        hh[..j].copy_from_slice(&h[..j]);
        h[0] = 0.0;
        for i in 1..=j {
            let right = knots[l + i];
            let left = knots[l + i - j];
            let f = hh[i - 1] / (right - left);
            h[i - 1] += f * (right - x);
            h[i] = f * (x - left);
        }
    }
    (l - k, h)
}

/// Collocation matrix `A[i][c] = B_c(x_i)` of the spline basis on `knots`.
pub(crate) fn collocation_matrix(knots: &[f64], k: usize, x: &[f64]) -> DMatrix<f64> {
    let n = x.len();
    let mut a = DMatrix::zeros(n, n);
    for (i, &xi) in x.iter().enumerate() {
        let (first, b) = basis(knots, k, xi, true);
        for r in 0..=k {
            a[(i, first + r)] = b[r];
        }
    }
    a
}
