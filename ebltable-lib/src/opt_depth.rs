use ebltable_data::TauTable;

use crate::constants::GEV_PER_TEV;
use crate::error::{RangeWarning, Result};
use crate::grid::TauGrid;
use crate::points::{Evaluation, Points, Tau};
use crate::surface::{SplineDegrees, SplineSurface};

/// Optical depth model interpolated from a tau table.
///
/// Holds the redshift grid, the log10 energy grid (GeV) and the tau grid,
/// plus the spline surface fitted through them. Immutable: the `with_*`
/// methods build a new model and pay the full surface fit.
#[derive(Debug, Clone)]
pub struct OptDepth {
    redshift: Vec<f64>,
    log_energy_gev: Vec<f64>,
    tau: TauGrid,
    surface: SplineSurface,
}

impl OptDepth {
    /// Build a model with the default surface degrees (2, 2).
    ///
    /// # Arguments
    /// * `redshift` - Redshift grid, strictly increasing
    /// * `energy_gev` - Energy grid in GeV, strictly increasing
    /// * `tau` - Optical depths, one row per energy, one column per redshift
    pub fn new(redshift: Vec<f64>, energy_gev: &[f64], tau: TauGrid) -> Result<Self> {
        Self::with_degrees(redshift, energy_gev, tau, SplineDegrees::default())
    }

    pub fn with_degrees(
        redshift: Vec<f64>,
        energy_gev: &[f64],
        tau: TauGrid,
        degrees: SplineDegrees,
    ) -> Result<Self> {
        let log_energy_gev = energy_gev.iter().map(|e| e.log10()).collect();
        Self::build(redshift, log_energy_gev, tau, degrees)
    }

    /// Build from a persisted table with the default degrees.
    pub fn from_table(table: &TauTable) -> Result<Self> {
        Self::from_table_with_degrees(table, SplineDegrees::default())
    }

    pub fn from_table_with_degrees(table: &TauTable, degrees: SplineDegrees) -> Result<Self> {
        let tau = TauGrid::from_rows(&table.tau)?;
        Self::with_degrees(table.redshift.clone(), &table.energy_gev, tau, degrees)
    }

    fn build(
        redshift: Vec<f64>,
        log_energy_gev: Vec<f64>,
        tau: TauGrid,
        degrees: SplineDegrees,
    ) -> Result<Self> {
        let surface = SplineSurface::new(&log_energy_gev, &redshift, &tau, degrees)?;
        Ok(Self {
            redshift,
            log_energy_gev,
            tau,
            surface,
        })
    }

    /// New model with the redshift grid replaced.
    pub fn with_redshift_grid(&self, redshift: Vec<f64>) -> Result<Self> {
        Self::build(
            redshift,
            self.log_energy_gev.clone(),
            self.tau.clone(),
            self.degrees(),
        )
    }

    /// New model with the energy grid (GeV) replaced.
    pub fn with_energy_grid_gev(&self, energy_gev: &[f64]) -> Result<Self> {
        Self::with_degrees(
            self.redshift.clone(),
            energy_gev,
            self.tau.clone(),
            self.degrees(),
        )
    }

    /// New model with the tau grid replaced.
    pub fn with_tau_grid(&self, tau: TauGrid) -> Result<Self> {
        Self::build(
            self.redshift.clone(),
            self.log_energy_gev.clone(),
            tau,
            self.degrees(),
        )
    }

    /// New model refitted with different surface degrees.
    pub fn with_spline_degrees(&self, degrees: SplineDegrees) -> Result<Self> {
        Self::build(
            self.redshift.clone(),
            self.log_energy_gev.clone(),
            self.tau.clone(),
            degrees,
        )
    }

    pub fn redshift(&self) -> &[f64] {
        &self.redshift
    }

    pub fn log_energy_gev(&self) -> &[f64] {
        &self.log_energy_gev
    }

    pub fn energy_gev(&self) -> Vec<f64> {
        self.log_energy_gev.iter().map(|v| 10f64.powf(*v)).collect()
    }

    pub fn tau(&self) -> &TauGrid {
        &self.tau
    }

    pub fn degrees(&self) -> SplineDegrees {
        self.surface.degrees()
    }

    pub(crate) fn surface(&self) -> &SplineSurface {
        &self.surface
    }

    /// The defining grids as a persistable table.
    pub fn to_table(&self) -> TauTable {
        TauTable {
            redshift: self.redshift.clone(),
            energy_gev: self.energy_gev(),
            tau: self.tau.to_rows(),
        }
    }

    /// Optical depth at redshift `z` and energy `energy_tev` (TeV).
    ///
    /// Returns a `(z, energy)` matrix; the axis of a scalar input is
    /// squeezed away. See [`OptDepth::evaluate`] for the range caveat.
    pub fn opt_depth(&self, z: impl Into<Points>, energy_tev: impl Into<Points>) -> Tau {
        self.evaluate(z, energy_tev).tau
    }

    /// Like [`OptDepth::opt_depth`], also reporting a [`RangeWarning`].
    ///
    /// Redshifts below the grid are clamped to its lowest redshift, which
    /// may overestimate the optical depth; the warning is logged and
    /// returned alongside the values.
    pub fn evaluate(&self, z: impl Into<Points>, energy_tev: impl Into<Points>) -> Evaluation {
        let z: Points = z.into();
        let energy: Points = energy_tev.into();
        let zs = z.as_slice();
        let es = energy.as_slice();

        let warning = self.range_warning(zs);

        // the surface wants sorted axes, so sort and scatter back
        let args_z = argsort(zs);
        let args_e = argsort(es);
        let sorted_z: Vec<f64> = args_z.iter().map(|&i| zs[i]).collect();
        let sorted_log_e: Vec<f64> = args_e
            .iter()
            .map(|&i| (es[i] * GEV_PER_TEV).log10())
            .collect();
        let sorted = self.surface.evaluate_grid(&sorted_log_e, &sorted_z);

        let mut result = TauGrid::zeros(zs.len(), es.len());
        for (a, &iz) in args_z.iter().enumerate() {
            for (b, &ie) in args_e.iter().enumerate() {
                result.set(iz, ie, sorted.get(b, a));
            }
        }

        let tau = match (z.is_scalar(), energy.is_scalar()) {
            (true, true) => Tau::Scalar(result.get(0, 0)),
            (true, false) => Tau::Vector(result.row(0)),
            (false, true) => Tau::Vector(result.column(0)),
            (false, false) => Tau::Matrix(result),
        };
        Evaluation { tau, warning }
    }

    /// Attenuation factor `exp(-tau)`, shaped like [`OptDepth::opt_depth`].
    pub fn attenuation(&self, z: impl Into<Points>, energy_tev: impl Into<Points>) -> Tau {
        self.opt_depth(z, energy_tev).map(|t| (-t).exp())
    }

    /// Tabulate the forward evaluation on `z` x `energy_tev` for persistence.
    pub fn tabulate(&self, z: &[f64], energy_tev: &[f64]) -> TauTable {
        let evaluation = self.evaluate(z.to_vec(), energy_tev.to_vec());
        let matrix = match evaluation.tau {
            Tau::Matrix(m) => m,
            other => TauGrid::from_raw(z.len(), energy_tev.len(), other.into_vec()),
        };
        TauTable {
            redshift: z.to_vec(),
            energy_gev: energy_tev.iter().map(|e| e * GEV_PER_TEV).collect(),
            tau: matrix.transpose().to_rows(),
        }
    }

    pub(crate) fn range_warning(&self, zs: &[f64]) -> Option<RangeWarning> {
        let minimum = self.redshift[0];
        let requested = zs
            .iter()
            .copied()
            .filter(|&v| v < minimum)
            .min_by(f64::total_cmp)?;
        let warning = RangeWarning { requested, minimum };
        tracing::warn!(requested, minimum, "{warning}");
        Some(warning)
    }
}

fn argsort(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    idx
}
