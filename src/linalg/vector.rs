use ndarray::Array1;

use crate::error::{Error, Result};

/// Reserves and zero-fills a buffer, reporting allocation failure instead of aborting.
pub(crate) fn zeroed_buffer(len: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure { elements: len })?;
    buf.resize(len, 0.0);
    Ok(buf)
}

/// Fixed-length, owned sequence of `f64` values.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    data: Array1<f64>,
}

impl Vector {
    /// Zero-filled vector of `len` elements.
    pub fn zeros(len: usize) -> Result<Self> {
        Ok(Self::from_vec(zeroed_buffer(len)?))
    }

    /// Takes ownership of `data` without copying it.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            data: Array1::from_vec(data),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        self.data.get(index).copied().ok_or(Error::OutOfBounds {
            row: index,
            col: 0,
            rows: self.len(),
            cols: 1,
        })
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.len();
        let slot = self.data.get_mut(index).ok_or(Error::OutOfBounds {
            row: index,
            col: 0,
            rows: len,
            cols: 1,
        })?;
        *slot = value;
        Ok(())
    }

    /// Sum of element-wise products. Both vectors must have the same length.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                op: "dot",
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(self.data.dot(&other.data))
    }

    pub fn as_slice(&self) -> &[f64] {
        // Always standard layout, see `From<Array1<f64>>`.
        self.data.as_slice().unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.data.iter()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data.to_vec()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

impl From<Array1<f64>> for Vector {
    fn from(data: Array1<f64>) -> Self {
        if data.is_standard_layout() {
            Self { data }
        } else {
            Self::from_vec(data.to_vec())
        }
    }
}
