use crate::error::RangeWarning;
use crate::grid::TauGrid;

/// Evaluation coordinates: a single value or a 1-D array of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Points {
    Scalar(f64),
    Array(Vec<f64>),
}

impl Points {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Scalar(v) => std::slice::from_ref(v),
            Self::Array(v) => v,
        }
    }
}

impl From<f64> for Points {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for Points {
    fn from(v: Vec<f64>) -> Self {
        Self::Array(v)
    }
}

impl From<&Vec<f64>> for Points {
    fn from(v: &Vec<f64>) -> Self {
        Self::Array(v.clone())
    }
}

impl From<&[f64]> for Points {
    fn from(v: &[f64]) -> Self {
        Self::Array(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Points {
    fn from(v: [f64; N]) -> Self {
        Self::Array(v.to_vec())
    }
}

impl<const N: usize> From<&[f64; N]> for Points {
    fn from(v: &[f64; N]) -> Self {
        Self::Array(v.to_vec())
    }
}

/// Optical depths, with the axis of every scalar input squeezed away.
#[derive(Debug, Clone, PartialEq)]
pub enum Tau {
    /// Scalar redshift and scalar energy.
    Scalar(f64),
    /// Exactly one of the inputs was an array; values follow that array.
    Vector(Vec<f64>),
    /// `(redshifts, energies)` matrix.
    Matrix(TauGrid),
}

impl Tau {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&TauGrid> {
        match self {
            Self::Matrix(m) => Some(m),
            _ => None,
        }
    }

    /// All values, row-major for a matrix.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![v],
            Self::Vector(v) => v,
            Self::Matrix(m) => m.to_flat(),
        }
    }

    /// Apply `f` to every value, keeping the shape.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(v) => Self::Scalar(f(v)),
            Self::Vector(v) => Self::Vector(v.into_iter().map(f).collect()),
            Self::Matrix(m) => Self::Matrix(m.map(f)),
        }
    }
}

/// Result of a forward evaluation together with its range caveat.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub tau: Tau,
    pub warning: Option<RangeWarning>,
}
