use crate::constants::DEFAULT_ESTEPS;
use crate::error::{EblError, Result};
use crate::integrate::{linspace, simpson};
use crate::opt_depth::OptDepth;
use crate::spectrum::SpectralShape;

impl OptDepth {
    /// Average optical depth in each energy bin, weighted by `shape`.
    ///
    /// Uses [`DEFAULT_ESTEPS`] integration points per bin.
    pub fn opt_depth_ebin<S>(&self, z: f64, edges_tev: &[f64], shape: &S) -> Result<Vec<f64>>
    where
        S: SpectralShape + ?Sized,
    {
        self.opt_depth_ebin_steps(z, edges_tev, shape, DEFAULT_ESTEPS)
    }

    /// Average optical depth in each energy bin, weighted by `shape`.
    ///
    /// For the bin `[E_i, E_i+1]` this is
    /// `∫ w(E) tau(z, E) E dlnE / ∫ w(E) E dlnE`, both integrals by
    /// Simpson's rule on `esteps` points evenly spaced in ln E. Energy
    /// dispersion is neglected. A vanishing denominator yields a non-finite
    /// value for that bin.
    ///
    /// # Arguments
    /// * `z` - Redshift
    /// * `edges_tev` - `B + 1` bin edges in TeV, giving `B` results
    /// * `shape` - Assumed intrinsic spectrum
    /// * `esteps` - Integration points per bin, at least 2
    pub fn opt_depth_ebin_steps<S>(
        &self,
        z: f64,
        edges_tev: &[f64],
        shape: &S,
        esteps: usize,
    ) -> Result<Vec<f64>>
    where
        S: SpectralShape + ?Sized,
    {
        if esteps < 2 {
            return Err(EblError::InvalidSteps(esteps));
        }

        edges_tev
            .windows(2)
            .map(|edge| {
                let log_e = linspace(edge[0].ln(), edge[1].ln(), esteps);
                let energies: Vec<f64> = log_e.iter().map(|v| v.exp()).collect();
                let tau = self.opt_depth(z, energies.as_slice()).into_vec();
                let weight = shape.evaluate(&energies);
                if weight.len() != energies.len() {
                    return Err(EblError::WeightLength {
                        expected: energies.len(),
                        found: weight.len(),
                    });
                }

                let flux: Vec<f64> = weight.iter().zip(&energies).map(|(w, e)| w * e).collect();
                let weighted: Vec<f64> = flux.iter().zip(&tau).map(|(f, t)| f * t).collect();
                Ok(simpson(&weighted, &log_e) / simpson(&flux, &log_e))
            })
            .collect()
    }
}
