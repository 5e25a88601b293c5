use crate::error::{Error, Result};
use crate::linalg::Vector;

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::DimensionMismatch {
            op: "metric",
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    Ok(())
}

fn mean_of<I: Iterator<Item = f64>>(values: I, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let diffs = y_true.iter().zip(y_pred.iter()).map(|(t, p)| (t - p) * (t - p));
    Ok(mean_of(diffs, y_true.len()))
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let diffs = y_true.iter().zip(y_pred.iter()).map(|(t, p)| (t - p).abs());
    Ok(mean_of(diffs, y_true.len()))
}

pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let y_mean = mean_of(y_true.iter().copied(), y_true.len());
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean) * (t - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_squared_error() {
        let y_true = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let y_pred = Vector::from_vec(vec![1.0, 2.0, 5.0]);

        let mse = mean_squared_error(&y_true, &y_pred).unwrap();
        assert_abs_diff_eq!(mse, 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_absolute_error() {
        let y_true = Vector::from_vec(vec![1.0, -2.0]);
        let y_pred = Vector::from_vec(vec![2.0, 0.0]);

        assert_abs_diff_eq!(mean_absolute_error(&y_true, &y_pred).unwrap(), 1.5);
    }

    #[test]
    fn test_r2_score() {
        let y_true = Vector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);

        let r2 = r2_score(&y_true, &y_true).unwrap();
        assert_abs_diff_eq!(r2, 1.0, epsilon = 1e-12);

        let mean_pred = Vector::from_vec(vec![2.5; 4]);
        assert_abs_diff_eq!(r2_score(&y_true, &mean_pred).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_r2_constant_target() {
        let y_true = Vector::from_vec(vec![3.0, 3.0]);
        assert_eq!(r2_score(&y_true, &y_true).unwrap(), 1.0);
        let y_pred = Vector::from_vec(vec![3.0, 4.0]);
        assert_eq!(r2_score(&y_true, &y_pred).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let y_true = Vector::from_vec(vec![1.0, 2.0]);
        let y_pred = Vector::from_vec(vec![1.0]);
        assert!(mean_squared_error(&y_true, &y_pred).is_err());
        assert!(r2_score(&y_true, &y_pred).is_err());
    }
}
