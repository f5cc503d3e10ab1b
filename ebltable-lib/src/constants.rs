/// GeV per TeV.
pub const GEV_PER_TEV: f64 = 1e3;

/// Integration points per energy bin used by the bin averager.
pub const DEFAULT_ESTEPS: usize = 50;
