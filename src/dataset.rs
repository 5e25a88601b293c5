use crate::error::{Error, Result};
use crate::linalg::Vector;

/// A named predictor column.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub name: String,
    pub data: Vector,
}

/// The target column has the same shape as a predictor.
pub type Output = Feature;

impl Feature {
    pub fn new(name: impl Into<String>, data: impl Into<Vector>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Checks that every feature column has `n_samples` observations.
pub(crate) fn check_columns(op: &'static str, features: &[Feature], n_samples: usize) -> Result<()> {
    for feature in features {
        if feature.len() != n_samples {
            return Err(Error::DimensionMismatch {
                op,
                expected: n_samples,
                actual: feature.len(),
            });
        }
    }
    Ok(())
}

/// Predictor columns bundled with the target they are fitted against.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Vec<Feature>,
    pub output: Output,
}

impl Dataset {
    pub fn new(features: Vec<Feature>, output: Output) -> Result<Self> {
        check_columns("dataset", &features, output.len())?;
        Ok(Self { features, output })
    }

    pub fn n_samples(&self) -> usize {
        self.output.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    pub fn feature_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.features.iter().map(|f| f.name.as_str())
    }
}
