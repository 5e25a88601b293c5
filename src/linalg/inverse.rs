//! Gauss-Jordan inversion on an augmented `[A | I]` matrix.
//!
//! Two pivot strategies are available. [`Pivoting::None`] takes the diagonal
//! entry of the current row as the pivot, so a zero on the diagonal is
//! reported as singular even when another row could supply a pivot.
//! [`Pivoting::Partial`] swaps in the row with the largest magnitude in the
//! pivot column first. Every matrix inverted without pivoting is also inverted
//! with partial pivoting.
//!
//! By default only an exactly zero pivot is singular, so the result does not
//! depend on how the rows or columns of the input are scaled. A non-zero
//! tolerance is measured against the largest absolute entry of the pivot
//! row's original values.

use ndarray::{Array2, Axis, s};

use super::vector::zeroed_buffer;
use crate::error::{Error, Result};

/// Default pivot tolerance: only an exactly zero pivot is singular.
pub const DEFAULT_TOLERANCE: f64 = 0.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pivoting {
    /// Use the diagonal entry of each row as is.
    None,
    /// Swap in the row with the largest absolute value in the pivot column.
    Partial,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InversionOptions {
    pivoting: Pivoting,
    tolerance: f64,
}

impl InversionOptions {
    pub fn new() -> Self {
        Self {
            pivoting: Pivoting::Partial,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// No row swaps, and only an exactly zero pivot counts as singular.
    pub fn exact() -> Self {
        Self {
            pivoting: Pivoting::None,
            tolerance: 0.0,
        }
    }

    pub fn pivoting(mut self, pivoting: Pivoting) -> Self {
        self.pivoting = pivoting;
        self
    }

    /// A pivot with `|pivot| <= tolerance * max_j |a_rj|`, where `r` is the
    /// original row the pivot came from, is treated as zero.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        if !(tolerance >= 0.0) {
            panic!("tolerance must be non-negative, got {}", tolerance);
        }
        self.tolerance = tolerance;
        self
    }

    pub fn pivoting_strategy(&self) -> Pivoting {
        self.pivoting
    }

    pub fn pivot_tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for InversionOptions {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn gauss_jordan(a: &Array2<f64>, options: &InversionOptions) -> Result<Array2<f64>> {
    let n = a.nrows();
    let width = n
        .checked_mul(2)
        .ok_or(Error::AllocationFailure { elements: usize::MAX })?;
    let elements = n
        .checked_mul(width)
        .ok_or(Error::AllocationFailure { elements: usize::MAX })?;

    let mut aug = Array2::from_shape_vec((n, width), zeroed_buffer(elements)?)
        .map_err(|_| Error::AllocationFailure { elements })?;
    aug.slice_mut(s![.., ..n]).assign(a);
    aug.slice_mut(s![.., n..]).diag_mut().fill(1.0);

    let mut row_scale = a
        .rows()
        .into_iter()
        .map(|row| row.iter().fold(0.0_f64, |m, v| m.max(v.abs())))
        .collect::<Vec<_>>();

    for i in 0..n {
        let pivot_row = match options.pivoting {
            Pivoting::None => i,
            Pivoting::Partial => {
                let mut best = i;
                for k in (i + 1)..n {
                    if aug[(k, i)].abs() > aug[(best, i)].abs() {
                        best = k;
                    }
                }
                best
            }
        };

        let pivot = aug[(pivot_row, i)];
        let threshold = if options.tolerance > 0.0 {
            options.tolerance * row_scale[pivot_row]
        } else {
            0.0
        };
        if !(pivot.abs() > threshold) {
            return Err(Error::SingularMatrix { column: i, pivot });
        }

        if pivot_row != i {
            log::trace!("swapping rows {} and {} for pivot column {}", i, pivot_row, i);
            for j in 0..width {
                aug.swap((i, j), (pivot_row, j));
            }
            row_scale.swap(i, pivot_row);
        }

        aug.row_mut(i).mapv_inplace(|v| v / pivot);
        let normalized = aug.row(i).to_owned();

        for (k, mut row) in aug.axis_iter_mut(Axis(0)).enumerate() {
            if k == i {
                continue;
            }
            let factor = row[i];
            if factor != 0.0 {
                row.scaled_add(-factor, &normalized);
            }
        }
    }

    Ok(aug.slice(s![.., n..]).to_owned())
}
