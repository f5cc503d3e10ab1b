use nalgebra::DMatrix;

use crate::bspline::{MAX_DEGREE, basis, collocation_matrix, interpolation_knots, validate_axis};
use crate::error::{Axis, EblError, Result};
use crate::grid::TauGrid;

/// Polynomial degree of the surface along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineDegrees {
    /// Degree along log-energy.
    pub kx: usize,
    /// Degree along redshift.
    pub ky: usize,
}

impl Default for SplineDegrees {
    fn default() -> Self {
        Self { kx: 2, ky: 2 }
    }
}

/// Tensor-product interpolating spline over (log10 energy, redshift).
#[derive(Debug, Clone)]
pub struct SplineSurface {
    tx: Vec<f64>,
    ty: Vec<f64>,
    degrees: SplineDegrees,
    /// Coefficients, one row per energy basis function.
    coeffs: DMatrix<f64>,
}

impl SplineSurface {
    /// Fit the surface through every sample of `z` (shape `x.len() x y.len()`).
    pub fn new(x: &[f64], y: &[f64], z: &TauGrid, degrees: SplineDegrees) -> Result<Self> {
        let expected = (x.len(), y.len());
        if z.shape() != expected {
            return Err(EblError::Shape {
                expected,
                found: z.shape(),
            });
        }
        validate_axis(x, degrees.kx, Axis::Energy)?;
        validate_axis(y, degrees.ky, Axis::Redshift)?;

        let tx = interpolation_knots(x, degrees.kx);
        let ty = interpolation_knots(y, degrees.ky);
        let ax = collocation_matrix(&tx, degrees.kx, x).lu();
        let ay = collocation_matrix(&ty, degrees.ky, y).lu();

        // Z = Ax * C * Ay^T: solve along energy, then along redshift
        let w = ax.solve(z.matrix()).ok_or(EblError::Singular(Axis::Energy))?;
        let coeffs = ay
            .solve(&w.transpose())
            .ok_or(EblError::Singular(Axis::Redshift))?
            .transpose();

        tracing::debug!(
            energies = x.len(),
            redshifts = y.len(),
            kx = degrees.kx,
            ky = degrees.ky,
            "built optical depth surface"
        );

        Ok(Self {
            tx,
            ty,
            degrees,
            coeffs,
        })
    }

    pub fn degrees(&self) -> SplineDegrees {
        self.degrees
    }

    /// Evaluate on the grid `x` cross `y`, returning a `x.len() x y.len()` grid.
    ///
    /// Both coordinate vectors must be sorted ascending. Coordinates outside
    /// the tabulated range are clamped to its boundary.
    pub fn evaluate_grid(&self, x: &[f64], y: &[f64]) -> TauGrid {
        debug_assert!(x.windows(2).all(|w| w[0].total_cmp(&w[1]).is_le()), "x must be sorted");
        debug_assert!(y.windows(2).all(|w| w[0].total_cmp(&w[1]).is_le()), "y must be sorted");

        let (kx, ky) = (self.degrees.kx, self.degrees.ky);
        let bx: Vec<(usize, [f64; MAX_DEGREE + 1])> =
            x.iter().map(|&v| basis(&self.tx, kx, v, true)).collect();
        let by: Vec<(usize, [f64; MAX_DEGREE + 1])> =
            y.iter().map(|&v| basis(&self.ty, ky, v, true)).collect();

        DMatrix::from_fn(x.len(), y.len(), |i, j| {
            let (fx, hx) = &bx[i];
            let (fy, hy) = &by[j];
            let mut sum = 0.0;
            for (a, &wx) in hx[..=kx].iter().enumerate() {
                for (b, &wy) in hy[..=ky].iter().enumerate() {
                    sum += wx * wy * self.coeffs[(fx + a, fy + b)];
                }
            }
            sum
        })
        .into()
    }

    /// Evaluate at a single point.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.evaluate_grid(&[x], &[y]).get(0, 0)
    }
}
