//! WASM bindings for ebltable.
//!
//! Build with:
//! ```sh
//! wasm-pack build -p ebltable-wasm
//! ```

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

use ebltable::{Catalog, DEFAULT_ESTEPS, InverseConfig, OptDepth, PowerLaw, TauGrid};

fn to_js(e: ebltable::EblError) -> JsError {
    JsError::new(&e.to_string())
}

/// An optical depth model held on the Rust side.
#[wasm_bindgen]
pub struct OptDepthModel {
    inner: OptDepth,
}

#[wasm_bindgen]
impl OptDepthModel {
    /// Build from the redshift grid, the energy grid (GeV) and the tau grid
    /// flattened energy-major (`tau[i * redshift.length + j]`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        redshift: Vec<f64>,
        energy_gev: &[f64],
        tau: Vec<f64>,
    ) -> Result<OptDepthModel, JsError> {
        let grid = TauGrid::from_flat(energy_gev.len(), redshift.len(), tau).map_err(to_js)?;
        let inner = OptDepth::new(redshift, energy_gev, grid).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Model `name` from a zstd-compressed catalog blob.
    #[wasm_bindgen(js_name = fromCatalog)]
    pub fn from_catalog(blob: &[u8], name: &str) -> Result<OptDepthModel, JsError> {
        let catalog = Catalog::from_compressed(blob).map_err(to_js)?;
        let inner = catalog.model(name).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Optical depths for every (z, E) pair, flattened redshift-major
    /// (`result[iz * energies.length + ie]`). Energies in TeV.
    #[wasm_bindgen(js_name = optDepth)]
    pub fn opt_depth(&self, z: &[f64], energy_tev: &[f64]) -> Float64Array {
        let values = self.inner.opt_depth(z, energy_tev).into_vec();
        Float64Array::from(values.as_slice())
    }

    /// Attenuation `exp(-tau)`, laid out like [`OptDepthModel::opt_depth`].
    #[wasm_bindgen]
    pub fn attenuation(&self, z: &[f64], energy_tev: &[f64]) -> Float64Array {
        let values = self.inner.attenuation(z, energy_tev).into_vec();
        Float64Array::from(values.as_slice())
    }

    /// Energy in GeV where the optical depth at `z` reaches `tau`.
    #[wasm_bindgen(js_name = optDepthInverse)]
    pub fn opt_depth_inverse(
        &self,
        z: f64,
        tau: f64,
        check_monotonic: Option<bool>,
    ) -> Result<f64, JsError> {
        let config = InverseConfig {
            check_monotonic: check_monotonic.unwrap_or(false),
            ..InverseConfig::default()
        };
        self.inner
            .opt_depth_inverse_with(z, tau, &config)
            .map_err(to_js)
    }

    /// Bin-averaged optical depth for a power law `E^-index`; edges in TeV.
    /// `esteps` defaults to 50 points per bin.
    #[wasm_bindgen(js_name = optDepthEbinPowerLaw)]
    pub fn opt_depth_ebin_power_law(
        &self,
        z: f64,
        edges_tev: &[f64],
        index: f64,
        esteps: Option<usize>,
    ) -> Result<Float64Array, JsError> {
        let avg = self
            .inner
            .opt_depth_ebin_steps(
                z,
                edges_tev,
                &PowerLaw::new(index),
                esteps.unwrap_or(DEFAULT_ESTEPS),
            )
            .map_err(to_js)?;
        Ok(Float64Array::from(avg.as_slice()))
    }

    #[wasm_bindgen(getter)]
    pub fn redshift(&self) -> Vec<f64> {
        self.inner.redshift().to_vec()
    }

    #[wasm_bindgen(getter, js_name = logEnergyGev)]
    pub fn log_energy_gev(&self) -> Vec<f64> {
        self.inner.log_energy_gev().to_vec()
    }

    /// Tau grid flattened energy-major.
    #[wasm_bindgen(getter)]
    pub fn tau(&self) -> Vec<f64> {
        self.inner.tau().to_flat()
    }
}
