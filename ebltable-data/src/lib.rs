#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A catalog of tabulated EBL models, deserialized from a compressed blob.
#[derive(Debug, Serialize, Deserialize)]
pub struct EblCatalog {
    pub version: Vec<VersionRecord>,
    pub models: Vec<ModelRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionRecord {
    pub tag: String,
    pub date: String,
    pub notes: String,
}

/// One named model and the table it was tabulated into.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelRecord {
    pub name: String,
    /// Free-form citation of the publication the table comes from.
    pub reference: String,
    pub table: TauTable,
}

/// The three defining arrays of an optical depth model.
///
/// `tau[i][j]` is the optical depth at `energy_gev[i]` and `redshift[j]`,
/// so `tau` has one row per energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TauTable {
    pub redshift: Vec<f64>,
    pub energy_gev: Vec<f64>,
    pub tau: Vec<Vec<f64>>,
}
