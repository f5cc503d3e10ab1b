use nalgebra::DMatrix;

use crate::error::{EblError, Result};

/// Dense matrix of optical depths.
///
/// Rows run over energy, columns over redshift. Flat buffers going in and
/// out are row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TauGrid {
    data: DMatrix<f64>,
}

impl TauGrid {
    /// Build from a flat row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(EblError::Shape {
                expected: (rows, cols),
                found: (data.len() / cols.max(1), cols),
            });
        }
        Ok(Self::from_raw(rows, cols, data))
    }

    /// Build from nested rows. Ragged rows are a shape error.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(EblError::Shape {
                    expected: (nrows, ncols),
                    found: (nrows, row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_raw(nrows, ncols, data))
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            data: DMatrix::from_row_slice(rows, cols, &data),
        }
    }

    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: DMatrix::zeros(rows, cols),
        }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[(row, col)] = value;
    }

    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.row(row).iter().copied().collect()
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        self.data.column(col).iter().copied().collect()
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Values in row-major order.
    pub fn to_flat(&self) -> Vec<f64> {
        self.data.transpose().as_slice().to_vec()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows()).map(|r| self.row(r)).collect()
    }

    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Apply `f` to every value.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.map(f),
        }
    }
}

impl From<DMatrix<f64>> for TauGrid {
    fn from(data: DMatrix<f64>) -> Self {
        Self { data }
    }
}
