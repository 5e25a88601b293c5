//! Property tests for the linear algebra primitives and model persistence.

use std::io::Cursor;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::Array2;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use proptest::collection::vec as prop_vec;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use linfit::{Feature, LinearRegression, Matrix, Output, Vector};

/// Random matrix with a dominant diagonal, which is always invertible.
fn diagonally_dominant(n: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut a = Array2::random_using((n, n), Uniform::new(-1.0, 1.0), &mut rng);
    for i in 0..n {
        a[(i, i)] += n as f64 + 1.0;
    }
    Matrix::from(a)
}

/// Diagonally dominant matrix with column `j` multiplied by `10^exponents[j]`.
fn column_scaled(seed: u64, exponents: &[f64]) -> Matrix {
    let n = exponents.len();
    let mut a = diagonally_dominant(n, seed).as_array().to_owned();
    for (mut column, exponent) in a.columns_mut().into_iter().zip(exponents) {
        column *= 10f64.powf(*exponent);
    }
    Matrix::from(a)
}

fn assert_close(a: &Matrix, b: &Matrix, epsilon: f64) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.as_array().iter().zip(b.as_array().iter()) {
        assert_abs_diff_eq!(*x, *y, epsilon = epsilon);
    }
}

fn arb_finite() -> impl Strategy<Value = f64> {
    -1e6..1e6
}

fn arb_matrix() -> impl Strategy<Value = Matrix> {
    (0usize..6, 0usize..6).prop_flat_map(|(rows, cols)| {
        prop_vec(arb_finite(), rows * cols)
            .prop_map(move |data| Matrix::from_shape_vec(rows, cols, data).unwrap())
    })
}

proptest! {
    #[test]
    fn transpose_is_an_involution(a in arb_matrix()) {
        prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn transpose_swaps_indices(a in arb_matrix()) {
        let t = a.transpose();
        let (rows, cols) = a.shape();
        prop_assert_eq!(t.shape(), (cols, rows));
        for i in 0..rows {
            for j in 0..cols {
                prop_assert_eq!(t.get(j, i).unwrap(), a.get(i, j).unwrap());
            }
        }
    }

    #[test]
    fn dot_is_commutative(pairs in prop_vec((arb_finite(), arb_finite()), 0..32)) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let a = Vector::from_vec(a);
        let b = Vector::from_vec(b);
        prop_assert_eq!(a.dot(&b).unwrap(), b.dot(&a).unwrap());
    }

    #[test]
    fn inverse_round_trips(n in 1usize..8, seed in any::<u64>()) {
        let a = diagonally_dominant(n, seed);
        let inv = a.invert().unwrap();

        assert_close(&a.multiply(&inv).unwrap(), &Matrix::identity(n).unwrap(), 1e-9);
        assert_close(&inv.invert().unwrap(), &a, 1e-9);
    }

    #[test]
    fn inverse_ignores_diagonal_scale(exponents in prop_vec(-8.0f64..8.0, 1..8)) {
        let n = exponents.len();
        let mut a = Matrix::zeros(n, n).unwrap();
        for (i, exponent) in exponents.iter().enumerate() {
            a.set(i, i, 10f64.powf(*exponent)).unwrap();
        }
        let inv = a.invert().unwrap();

        for i in 0..n {
            assert_relative_eq!(inv.get(i, i).unwrap() * a.get(i, i).unwrap(), 1.0, max_relative = 1e-12);
        }
        assert_close(&a.multiply(&inv).unwrap(), &Matrix::identity(n).unwrap(), 1e-12);
    }

    #[test]
    fn inverse_of_badly_scaled_matrix(
        seed in any::<u64>(),
        exponents in prop_vec(-8.0f64..8.0, 1..8),
    ) {
        let a = column_scaled(seed, &exponents);
        let inv = a.invert().unwrap();
        assert_close(&a.multiply(&inv).unwrap(), &Matrix::identity(exponents.len()).unwrap(), 1e-9);
    }

    #[test]
    fn persisted_model_round_trips(
        has_intercept in any::<bool>(),
        weights in prop_vec(any::<f64>(), 1..8),
    ) {
        let names = (0..weights.len())
            .map(|i| if has_intercept && i == 0 { "Intercept".to_string() } else { format!("f{}", i) })
            .collect::<Vec<_>>();
        let model = LinearRegression::from_weights(has_intercept, weights, names).unwrap();

        let mut buf = Vec::new();
        model.write_to(&mut buf).unwrap();
        let loaded = LinearRegression::read_from(&mut Cursor::new(buf)).unwrap();

        prop_assert_eq!(loaded.has_intercept(), has_intercept);
        prop_assert_eq!(loaded.weight_names(), model.weight_names());
        let bits = |m: &LinearRegression| m.weights().iter().map(|w| w.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&loaded), bits(&model));
    }
}

#[test]
fn recovers_random_linear_function() {
    let mut rng = StdRng::seed_from_u64(7);
    let n_samples = 40;
    let x = Array2::random_using((n_samples, 3), Uniform::new(-10.0, 10.0), &mut rng);
    let coefficients = [1.5, -0.25, 3.0];
    let intercept = -4.0;

    let features = (0..3)
        .map(|j| Feature::new(format!("x{}", j), x.column(j).to_vec()))
        .collect::<Vec<_>>();
    let y = x
        .rows()
        .into_iter()
        .map(|row| intercept + row.iter().zip(&coefficients).map(|(a, b)| a * b).sum::<f64>())
        .collect::<Vec<_>>();

    let model = LinearRegression::train(&features, &Output::new("y", y), true).unwrap();
    assert_abs_diff_eq!(model.intercept().unwrap(), intercept, epsilon = 1e-9);
    for (got, want) in model.coefficients().iter().zip(coefficients.iter()) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-9);
    }
}
