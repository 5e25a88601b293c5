//! Linear models for regression.
//!
//! [`LinearRegression`] fits ordinary least squares weights with the normal
//! equation and can be saved to and loaded from a compact binary file.
//!
//! # Examples
//!
//! ```rust
//! use linfit::{Feature, LinearRegression, Output};
//!
//! let features = vec![Feature::new("x", vec![0.0, 1.0, 2.0, 3.0, 4.0])];
//! let output = Output::new("y", vec![3.0, 7.0, 11.0, 15.0, 19.0]);
//!
//! let model = LinearRegression::train(&features, &output, true).unwrap();
//! let prediction = model.predict(&[5.0]).unwrap();
//! assert!((prediction - 23.0).abs() < 1e-9);
//! ```

mod linear_regression;
mod persist;

pub use linear_regression::{INTERCEPT_NAME, LinearRegression};
