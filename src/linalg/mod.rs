//! Dense linear algebra primitives used by the regression models.
//!
//! All operations return new values and report contract violations
//! (shape mismatches, out-of-range indices, singular matrices) as
//! [`Error`](crate::Error) values instead of panicking.
//!
//! # Examples
//! ```rust
//! use linfit::linalg::Matrix;
//!
//! let a = Matrix::from_shape_vec(2, 2, vec![4.0, 7.0, 2.0, 6.0]).unwrap();
//! let inv = a.invert().unwrap();
//! let product = a.multiply(&inv).unwrap();
//! assert!((product.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
//! ```

mod inverse;
mod matrix;
mod vector;

pub use inverse::{DEFAULT_TOLERANCE, InversionOptions, Pivoting};
pub use matrix::Matrix;
pub use vector::Vector;
