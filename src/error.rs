use std::io;

use thiserror::Error;

/// Errors produced by the linear algebra primitives, model fitting and
/// model persistence.
#[derive(Debug, Error)]
pub enum Error {
    /// Operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch in {op}: expected {expected}, got {actual}")]
    DimensionMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Element access outside the matrix (a vector is reported as a single column).
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// No usable pivot was found while inverting.
    #[error("singular matrix: pivot {pivot:e} in column {column} is below tolerance")]
    SingularMatrix { column: usize, pivot: f64 },

    #[error("failed to allocate storage for {elements} elements")]
    AllocationFailure { elements: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The model file ended before the named field was complete.
    #[error("model file truncated while reading {0}")]
    Truncated(&'static str),

    #[error("corrupt model file: {0}")]
    CorruptModel(String),

    /// Weight names are stored NUL-terminated, so they cannot contain NUL.
    #[error("weight name {0:?} cannot be persisted")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
