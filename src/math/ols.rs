//! Least squares solver for the linear regressor.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - [1, x_i]^T β)^2
//! ```
//!
//! over an intercept plus one coefficient per feature column.
//!
//! Implementation choices:
//! - SVD rather than normal equations. Label-encoded columns are frequently
//!   constant (a single category seen in training) which makes `XᵀX` singular;
//!   SVD with a singular-value cutoff returns the minimum-norm solution instead.
//! - The system can be wide (fewer examples than columns) right after the
//!   first few records; SVD handles both shapes.

use nalgebra::{DMatrix, DVector};

/// Fit `y ≈ β0 + Σ βj x_j` and return `[β0, β1, ...]`.
///
/// Returns `None` for empty or ragged input, non-finite values, or when no
/// tolerance yields a finite solution.
pub fn solve_least_squares(rows: &[Vec<f64>], y: &[f64]) -> Option<Vec<f64>> {
    let n = rows.len();
    if n == 0 || y.len() != n {
        return None;
    }
    let width = rows[0].len();
    if rows.iter().any(|r| r.len() != width) {
        return None;
    }
    if rows.iter().flatten().chain(y).any(|v| !v.is_finite()) {
        return None;
    }

    let p = width + 1;
    let x = DMatrix::from_fn(n, p, |i, j| if j == 0 { 1.0 } else { rows[i][j - 1] });
    let y = DVector::from_column_slice(y);

    let svd = x.svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(&y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta.iter().copied().collect());
            }
        }
    }

    None
}

/// Evaluate `β0 + Σ βj x_j`.
pub fn linear_predict(coefficients: &[f64], row: &[f64]) -> f64 {
    let Some((intercept, slopes)) = coefficients.split_first() else {
        return f64::NAN;
    };
    intercept + slopes.iter().zip(row).map(|(b, x)| b * x).sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let rows = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = [2.0, 5.0, 8.0];

        let beta = solve_least_squares(&rows, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn constant_columns_do_not_break_the_solve() {
        // Second column never varies; y = 100 * hours.
        let rows = vec![vec![2.0, 0.0], vec![4.0, 0.0], vec![8.0, 0.0]];
        let y = [200.0, 400.0, 800.0];

        let beta = solve_least_squares(&rows, &y).unwrap();
        let pred = linear_predict(&beta, &[6.0, 0.0]);
        assert!((pred - 600.0).abs() < 1e-6, "got {pred}");
    }

    #[test]
    fn rejects_ragged_or_non_finite_input() {
        assert!(solve_least_squares(&[], &[]).is_none());
        assert!(solve_least_squares(&[vec![1.0], vec![1.0, 2.0]], &[1.0, 2.0]).is_none());
        assert!(solve_least_squares(&[vec![f64::NAN]], &[1.0]).is_none());
    }
}
