//! Intrinsic spectral shapes used to weight the bin-averaged optical depth.
//!
//! All shapes are differential photon spectra dN/dE with energies in TeV.
//! Only the shape matters for the bin average, so normalisations cancel.

/// A spectral shape evaluated on an array of energies (TeV).
pub trait SpectralShape {
    fn evaluate(&self, energies_tev: &[f64]) -> Vec<f64>;
}

/// Any `Fn(E_TeV) -> dN/dE` closure is a shape.
impl<F> SpectralShape for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, energies_tev: &[f64]) -> Vec<f64> {
        energies_tev.iter().map(|&e| self(e)).collect()
    }
}

/// Constant weight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flat;

impl SpectralShape for Flat {
    fn evaluate(&self, energies_tev: &[f64]) -> Vec<f64> {
        vec![1.0; energies_tev.len()]
    }
}

/// `N0 * (E / E0)^(-index)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub prefactor: f64,
    pub index: f64,
    pub scale_tev: f64,
}

impl PowerLaw {
    /// Unit normalisation at 1 TeV.
    pub fn new(index: f64) -> Self {
        Self {
            prefactor: 1.0,
            index,
            scale_tev: 1.0,
        }
    }
}

impl SpectralShape for PowerLaw {
    fn evaluate(&self, energies_tev: &[f64]) -> Vec<f64> {
        energies_tev
            .iter()
            .map(|&e| self.prefactor * (e / self.scale_tev).powf(-self.index))
            .collect()
    }
}

/// `N0 * (E / E0)^(-alpha - beta * ln(E / E0))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogParabola {
    pub prefactor: f64,
    pub alpha: f64,
    pub beta: f64,
    pub scale_tev: f64,
}

impl SpectralShape for LogParabola {
    fn evaluate(&self, energies_tev: &[f64]) -> Vec<f64> {
        energies_tev
            .iter()
            .map(|&e| {
                let x = e / self.scale_tev;
                self.prefactor * x.powf(-self.alpha - self.beta * x.ln())
            })
            .collect()
    }
}

/// `N0 * (E / E0)^(-index) * exp(-E / Ecut)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawExpCutoff {
    pub prefactor: f64,
    pub index: f64,
    pub scale_tev: f64,
    pub cutoff_tev: f64,
}

impl SpectralShape for PowerLawExpCutoff {
    fn evaluate(&self, energies_tev: &[f64]) -> Vec<f64> {
        energies_tev
            .iter()
            .map(|&e| {
                let power = self.prefactor * (e / self.scale_tev).powf(-self.index);
                power * (-e / self.cutoff_tev).exp()
            })
            .collect()
    }
}
