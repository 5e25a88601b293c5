use std::fmt;

use crate::dataset::{Dataset, Feature, Output, check_columns};
use crate::error::{Error, Result};
use crate::linalg::{InversionOptions, Matrix, Vector};

/// Name given to the constant weight of a model fitted with an intercept.
pub const INTERCEPT_NAME: &str = "Intercept";

/// Ordinary least squares model fitted with the normal equation
/// `w = (XᵗX)⁻¹ Xᵗy`.
///
/// With an intercept, `weights()[0]` is the intercept and the remaining
/// weights follow the feature order used for training. Without one, weight
/// `i` belongs to feature `i`.
#[derive(Clone, Debug)]
pub struct LinearRegression {
    has_intercept: bool,
    weights: Vector,
    weight_names: Vec<String>,
    inversion: InversionOptions,
}

fn weight_names_for(features: &[Feature], has_intercept: bool) -> Vec<String> {
    let intercept = has_intercept.then(|| INTERCEPT_NAME.to_string());
    intercept
        .into_iter()
        .chain(features.iter().map(|f| f.name.clone()))
        .collect()
}

impl LinearRegression {
    /// Zero-weight model with one weight per feature, plus the intercept.
    pub fn init(features: &[Feature], has_intercept: bool) -> Result<Self> {
        let weight_names = weight_names_for(features, has_intercept);
        let weights = Vector::zeros(weight_names.len())?;
        Ok(Self {
            has_intercept,
            weights,
            weight_names,
            inversion: InversionOptions::default(),
        })
    }

    /// Model with known weights, named in the same order.
    pub fn from_weights(has_intercept: bool, weights: Vec<f64>, weight_names: Vec<String>) -> Result<Self> {
        if weights.len() != weight_names.len() {
            return Err(Error::DimensionMismatch {
                op: "from_weights",
                expected: weights.len(),
                actual: weight_names.len(),
            });
        }
        if has_intercept && weight_names.first().map(String::as_str) != Some(INTERCEPT_NAME) {
            return Err(Error::InvalidName(weight_names.first().cloned().unwrap_or_default()));
        }
        Ok(Self::from_parts(has_intercept, weights, weight_names))
    }

    pub(crate) fn from_parts(has_intercept: bool, weights: Vec<f64>, weight_names: Vec<String>) -> Self {
        Self {
            has_intercept,
            weights: Vector::from_vec(weights),
            weight_names,
            inversion: InversionOptions::default(),
        }
    }

    /// Pivoting and singularity tolerance used when solving the normal equation.
    pub fn inversion(mut self, options: InversionOptions) -> Self {
        self.inversion = options;
        self
    }

    /// Fits a new model to `features` and `output`.
    pub fn train(features: &[Feature], output: &Output, has_intercept: bool) -> Result<Self> {
        let mut model = Self::init(features, has_intercept)?;
        model.fit(features, output)?;
        Ok(model)
    }

    pub fn train_dataset(dataset: &Dataset, has_intercept: bool) -> Result<Self> {
        Self::train(&dataset.features, &dataset.output, has_intercept)
    }

    /// Refits the weights in place. The model is left unchanged on error.
    pub fn fit(&mut self, features: &[Feature], output: &Output) -> Result<()> {
        let n_inputs = self.n_inputs();
        if features.len() != n_inputs {
            return Err(Error::DimensionMismatch {
                op: "fit",
                expected: n_inputs,
                actual: features.len(),
            });
        }

        let n_samples = output.len();
        check_columns("fit", features, n_samples)?;

        log::debug!(
            "fitting {} weights on {} observations",
            self.weight_count(),
            n_samples
        );

        let x = self.design_matrix(features, n_samples)?;
        let y = Matrix::from_shape_vec(n_samples, 1, output.data.as_slice().to_vec())?;
        let weights = self.solve_normal_equation(&x, &y)?;

        self.weights = weights;
        self.weight_names = weight_names_for(features, self.has_intercept);
        Ok(())
    }

    fn design_matrix(&self, features: &[Feature], n_samples: usize) -> Result<Matrix> {
        let offset = usize::from(self.has_intercept);
        let mut x = Matrix::zeros(n_samples, self.weight_count())?;
        for i in 0..n_samples {
            if self.has_intercept {
                x.set(i, 0, 1.0)?;
            }
            for (j, feature) in features.iter().enumerate() {
                x.set(i, j + offset, feature.data.get(i)?)?;
            }
        }
        Ok(x)
    }

    fn solve_normal_equation(&self, x: &Matrix, y: &Matrix) -> Result<Vector> {
        let xt = x.transpose();
        let xtx = xt.multiply(x)?;
        let xtx_inv = xtx.invert_with(&self.inversion)?;
        let xty = xt.multiply(y)?;
        let w = xtx_inv.multiply(&xty)?;
        w.column(0)
    }

    /// Predicts a single observation. `input` holds one value per training
    /// feature, in training order, without an intercept slot.
    pub fn predict(&self, input: &[f64]) -> Result<f64> {
        let n_inputs = self.n_inputs();
        if input.len() != n_inputs {
            return Err(Error::DimensionMismatch {
                op: "predict",
                expected: n_inputs,
                actual: input.len(),
            });
        }

        let weighted: f64 = self
            .coefficients()
            .iter()
            .zip(input)
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.intercept().unwrap_or(0.0) + weighted)
    }

    /// Predicts `n_samples` observations from a set of feature columns, each of
    /// which must hold `n_samples` values. The count is explicit so a model
    /// without features still predicts one value per observation.
    pub fn predict_dataset(&self, features: &[Feature], n_samples: usize) -> Result<Vector> {
        if features.len() != self.n_inputs() {
            return Err(Error::DimensionMismatch {
                op: "predict",
                expected: self.n_inputs(),
                actual: features.len(),
            });
        }
        check_columns("predict", features, n_samples)?;

        let mut row = vec![0.0; features.len()];
        let mut predictions = Vector::zeros(n_samples)?;
        for i in 0..n_samples {
            for (slot, feature) in row.iter_mut().zip(features) {
                *slot = feature.data.get(i)?;
            }
            predictions.set(i, self.predict(&row)?)?;
        }
        Ok(predictions)
    }

    /// Coefficient of determination of the model's predictions against `output`.
    pub fn score(&self, features: &[Feature], output: &Output) -> Result<f64> {
        let predictions = self.predict_dataset(features, output.len())?;
        crate::metrics::r2_score(&output.data, &predictions)
    }

    pub fn has_intercept(&self) -> bool {
        self.has_intercept
    }

    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }

    /// Number of feature values expected by [`predict`](Self::predict).
    pub fn n_inputs(&self) -> usize {
        self.weight_count() - usize::from(self.has_intercept)
    }

    pub fn weights(&self) -> &[f64] {
        self.weights.as_slice()
    }

    pub fn weight_names(&self) -> &[String] {
        &self.weight_names
    }

    pub fn intercept(&self) -> Option<f64> {
        if self.has_intercept {
            self.weights().first().copied()
        } else {
            None
        }
    }

    /// Feature weights, without the intercept.
    pub fn coefficients(&self) -> &[f64] {
        &self.weights()[usize::from(self.has_intercept)..]
    }

    pub fn weight(&self, name: &str) -> Option<f64> {
        self.weight_names
            .iter()
            .position(|n| n == name)
            .map(|i| self.weights()[i])
    }
}

impl fmt::Display for LinearRegression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y =")?;
        if self.weight_count() == 0 {
            return write!(f, " 0");
        }
        let offset = usize::from(self.has_intercept);
        for (i, (weight, name)) in self.weights().iter().zip(&self.weight_names).enumerate() {
            let sep = if i == 0 { " " } else { " + " };
            if i < offset {
                write!(f, "{}{}", sep, weight)?;
            } else {
                write!(f, "{}{} * {}", sep, weight, name)?;
            }
        }
        Ok(())
    }
}
