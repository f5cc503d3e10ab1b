use std::fmt;

/// Which axis of the tau table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Energy,
    Redshift,
    /// The tau axis of the one-dimensional inverse curve.
    Tau,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Energy => f.write_str("energy"),
            Self::Redshift => f.write_str("redshift"),
            Self::Tau => f.write_str("tau"),
        }
    }
}

#[derive(Debug)]
pub enum EblError {
    /// Tau grid is not `(len(energy), len(redshift))`.
    Shape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    TooFewPoints {
        axis: Axis,
        points: usize,
        degree: usize,
    },
    NotIncreasing {
        axis: Axis,
        index: usize,
    },
    InvalidDegree {
        axis: Axis,
        degree: usize,
    },
    NonMonotonic {
        redshift: f64,
        index: usize,
    },
    /// Spline collocation system on this axis could not be solved.
    Singular(Axis),
    InvalidSteps(usize),
    /// A spectral shape returned the wrong number of weights.
    WeightLength {
        expected: usize,
        found: usize,
    },
    UnsupportedModel(String),
    Decode(String),
}

pub type Result<T> = std::result::Result<T, EblError>;

impl fmt::Display for EblError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { expected, found } => write!(
                f,
                "tau grid has shape {found:?}, expected {expected:?} (energies, redshifts)"
            ),
            Self::TooFewPoints {
                axis,
                points,
                degree,
            } => write!(
                f,
                "{axis} axis has {points} points, a degree {degree} spline needs at least {}",
                degree + 1
            ),
            Self::NotIncreasing { axis, index } => {
                write!(f, "{axis} grid is not strictly increasing at index {index}")
            }
            Self::InvalidDegree { axis, degree } => {
                write!(f, "spline degree {degree} on {axis} axis outside 1..=5")
            }
            Self::NonMonotonic { redshift, index } => write!(
                f,
                "optical depth decreases with energy at z = {redshift} (energy index {index})"
            ),
            Self::Singular(axis) => write!(f, "{axis} collocation matrix is singular"),
            Self::InvalidSteps(steps) => {
                write!(f, "need at least 2 integration steps per bin, got {steps}")
            }
            Self::WeightLength { expected, found } => write!(
                f,
                "spectral shape returned {found} weights for {expected} energies"
            ),
            Self::UnsupportedModel(name) => write!(f, "unsupported EBL model: {name}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for EblError {}

/// A requested redshift lies below the tabulated range.
///
/// Evaluation still succeeds with the surface clamped to the lowest grid
/// redshift, which may overestimate the optical depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeWarning {
    /// Smallest redshift that was requested.
    pub requested: f64,
    /// Smallest redshift of the grid.
    pub minimum: f64,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "z = {} is below interpolation range, zmin = {:.2}; optical depth may be overestimated",
            self.requested, self.minimum
        )
    }
}
