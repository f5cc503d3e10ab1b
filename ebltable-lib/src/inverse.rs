use crate::bspline::BSpline;
use crate::error::{Axis, EblError, Result};
use crate::opt_depth::OptDepth;

/// How the tau -> energy curve is fitted for [`OptDepth::opt_depth_inverse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InverseConfig {
    /// Degree of the interpolating spline in tau.
    pub degree: usize,
    /// Extend the end segments beyond the sampled tau range instead of clamping.
    pub extrapolate: bool,
    /// Reject curves where tau decreases with energy.
    pub check_monotonic: bool,
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            degree: 1,
            extrapolate: true,
            check_monotonic: false,
        }
    }
}

impl OptDepth {
    /// Returns the energy in GeV at which the optical depth at redshift `z`
    /// reaches `tau`, using [`InverseConfig::default`].
    pub fn opt_depth_inverse(&self, z: f64, tau: f64) -> Result<f64> {
        self.opt_depth_inverse_with(z, tau, &InverseConfig::default())
    }

    /// Returns the energy in GeV at which the optical depth at redshift `z`
    /// reaches `tau`.
    ///
    /// The surface is sampled on the stored energy grid at `z` and a spline
    /// mapping tau to log10 energy is fitted through the samples. Repeated
    /// tau values keep only their lowest-energy sample.
    pub fn opt_depth_inverse_with(&self, z: f64, tau: f64, config: &InverseConfig) -> Result<f64> {
        self.range_warning(&[z]);
        let curve = self
            .surface()
            .evaluate_grid(self.log_energy_gev(), &[z])
            .column(0);

        let (taus, log_e) =
            inverse_samples(&curve, self.log_energy_gev(), z, config.check_monotonic)?;
        let spline = BSpline::interpolate(&taus, &log_e, config.degree, Axis::Tau)?;
        Ok(10f64.powf(spline.evaluate(tau, config.extrapolate)))
    }
}

/// Order the `(tau, log_e)` samples by tau and drop repeated tau values.
fn inverse_samples(
    curve: &[f64],
    log_e: &[f64],
    z: f64,
    check_monotonic: bool,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if check_monotonic {
        if let Some(i) = curve.windows(2).position(|w| w[1] < w[0]) {
            return Err(EblError::NonMonotonic {
                redshift: z,
                index: i + 1,
            });
        }
    }

    // stable: equal taus stay in energy order
    let mut order: Vec<usize> = (0..curve.len()).collect();
    order.sort_by(|&a, &b| curve[a].total_cmp(&curve[b]));

    let mut taus: Vec<f64> = Vec::with_capacity(curve.len());
    let mut energies = Vec::with_capacity(curve.len());
    for i in order {
        if taus.last().is_some_and(|&last| curve[i] <= last) {
            continue;
        }
        taus.push(curve[i]);
        energies.push(log_e[i]);
    }
    Ok((taus, energies))
}
