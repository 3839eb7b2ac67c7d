//! Linear regressor over the encoded feature row.

use serde::{Deserialize, Serialize};

use crate::math::{linear_predict, solve_least_squares};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// `[intercept, β_industry, β_location, β_level, β_complexity, β_hours]`.
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn fit(rows: &[Vec<f64>], y: &[f64]) -> Option<Self> {
        solve_least_squares(rows, y).map(|coefficients| Self { coefficients })
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        if self.coefficients.len() != row.len() + 1 {
            return f64::NAN;
        }
        linear_predict(&self.coefficients, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_mismatch_predicts_nan() {
        let model = LinearModel {
            coefficients: vec![1.0, 2.0],
        };
        assert_eq!(model.predict(&[3.0]), 7.0);
        assert!(model.predict(&[3.0, 4.0]).is_nan());
    }
}
