use ndarray::{Array2, Axis};

use super::inverse::{self, InversionOptions};
use super::vector::{Vector, zeroed_buffer};
use crate::error::{Error, Result};

/// Dense row-major matrix of `f64` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Array2<f64>,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let elements = rows
            .checked_mul(cols)
            .ok_or(Error::AllocationFailure { elements: usize::MAX })?;
        Self::from_shape_vec(rows, cols, zeroed_buffer(elements)?)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        m.data.diag_mut().fill(1.0);
        Ok(m)
    }

    /// Builds a matrix from a flat row-major buffer of `rows * cols` values.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(Error::AllocationFailure { elements: usize::MAX })?;
        let actual = data.len();
        let data = Array2::from_shape_vec((rows, cols), data).map_err(|_| {
            Error::DimensionMismatch {
                op: "from_shape_vec",
                expected,
                actual,
            }
        })?;
        Ok(Self { data })
    }

    /// Stacks row vectors. Every row must have the length of the first.
    pub fn from_rows(rows: &[Vector]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vector::len);
        let mut m = Self::zeros(rows.len(), cols)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::DimensionMismatch {
                    op: "from_rows",
                    expected: cols,
                    actual: row.len(),
                });
            }
            m.data.row_mut(i).assign(row.as_array());
        }
        Ok(m)
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> Error {
        Error::OutOfBounds {
            row,
            col,
            rows: self.nrows(),
            cols: self.ncols(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.data
            .get((row, col))
            .copied()
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let err = self.out_of_bounds(row, col);
        let slot = self.data.get_mut((row, col)).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Result<Vector> {
        if i >= self.nrows() {
            return Err(self.out_of_bounds(i, 0));
        }
        Ok(Vector::from(self.data.index_axis(Axis(0), i).to_owned()))
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Result<Vector> {
        if j >= self.ncols() {
            return Err(self.out_of_bounds(0, j));
        }
        Ok(Vector::from(self.data.index_axis(Axis(1), j).to_owned()))
    }

    /// Matrix product `self * other`; requires `self.ncols() == other.nrows()`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.ncols() != other.nrows() {
            return Err(Error::DimensionMismatch {
                op: "multiply",
                expected: self.ncols(),
                actual: other.nrows(),
            });
        }
        Ok(Self {
            data: self.data.dot(&other.data),
        })
    }

    pub fn transpose(&self) -> Matrix {
        Self {
            // Re-laid out so the result stays row-major.
            data: self.data.t().as_standard_layout().into_owned(),
        }
    }

    /// Inverse via Gauss-Jordan elimination with the default options
    /// (partial pivoting, singular only on an exactly zero pivot).
    pub fn invert(&self) -> Result<Matrix> {
        self.invert_with(&InversionOptions::default())
    }

    pub fn invert_with(&self, options: &InversionOptions) -> Result<Matrix> {
        if !self.is_square() {
            return Err(Error::DimensionMismatch {
                op: "invert",
                expected: self.nrows(),
                actual: self.ncols(),
            });
        }
        let data = inverse::gauss_jordan(&self.data, options)?;
        Ok(Self { data })
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }
}

impl From<Array2<f64>> for Matrix {
    fn from(data: Array2<f64>) -> Self {
        Self { data }
    }
}
