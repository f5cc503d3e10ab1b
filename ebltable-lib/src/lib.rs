pub mod bspline;
pub mod catalog;
pub mod constants;
pub mod ebin;
pub mod error;
pub mod grid;
pub mod integrate;
pub mod inverse;
pub mod opt_depth;
pub mod points;
pub mod spectrum;
pub mod surface;

pub use catalog::Catalog;
pub use constants::DEFAULT_ESTEPS;
pub use error::{Axis, EblError, RangeWarning, Result};
pub use grid::TauGrid;
pub use inverse::InverseConfig;
pub use opt_depth::OptDepth;
pub use points::{Evaluation, Points, Tau};
pub use spectrum::{Flat, LogParabola, PowerLaw, PowerLawExpCutoff, SpectralShape};
pub use surface::{SplineDegrees, SplineSurface};
pub use ebltable_data;
