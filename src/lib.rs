//! Ordinary least squares linear regression over named feature columns.
//!
//! The crate is built from a small dense linear algebra layer
//! ([`linalg::Vector`], [`linalg::Matrix`] and Gauss-Jordan inversion) and a
//! [`LinearRegression`] model that solves the normal equation, predicts, and
//! persists its weights in a binary file.

pub mod dataset;
pub mod error;
pub mod linalg;
pub mod linear_model;
pub mod metrics;

pub use dataset::{Dataset, Feature, Output};
pub use error::{Error, Result};
pub use linalg::{InversionOptions, Matrix, Pivoting, Vector};
pub use linear_model::{INTERCEPT_NAME, LinearRegression};

