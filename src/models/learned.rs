//! Learned estimator artifact.
//!
//! A `LearnedModel` bundles the fitted regressor with the encoders it was
//! trained against. It is immutable once built; a retrain produces a new
//! value which the engine swaps in whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{JobFeatures, RegressorKind};
use crate::error::EstimateError;
use crate::fit::{FeatureEncoders, Forest, LinearModel};

/// Bumped whenever the serialized layout changes.
pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Regressor {
    Forest(Forest),
    Linear(LinearModel),
}

impl Regressor {
    pub fn kind(&self) -> RegressorKind {
        match self {
            Regressor::Forest(_) => RegressorKind::Forest,
            Regressor::Linear(_) => RegressorKind::Linear,
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        match self {
            Regressor::Forest(forest) => forest.predict(row),
            Regressor::Linear(linear) => linear.predict(row),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedModel {
    pub format_version: u32,
    pub trained_at: DateTime<Utc>,
    /// Size of the training set the model was fitted on.
    pub n_examples: usize,
    pub encoders: FeatureEncoders,
    pub regressor: Regressor,
}

impl LearnedModel {
    /// Point price for `features`.
    pub fn estimate(&self, features: &JobFeatures) -> Result<f64, EstimateError> {
        let row = self.encoders.encode(features)?;
        let point = self.regressor.predict(&row);
        if point.is_finite() {
            Ok(point)
        } else {
            Err(EstimateError::NonFinite(point))
        }
    }

    pub fn kind(&self) -> RegressorKind {
        self.regressor.kind()
    }
}

/// Estimate with an optional model; absence is reported like any other failure.
pub fn estimate_with(
    model: Option<&LearnedModel>,
    features: &JobFeatures,
) -> Result<f64, EstimateError> {
    model.ok_or(EstimateError::ModelAbsent)?.estimate(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Complexity, ExperienceLevel, TrainingExample};

    fn linear_model(coefficients: Vec<f64>) -> LearnedModel {
        let examples = [TrainingExample {
            industry: "plumbing".into(),
            location: "gauteng".into(),
            experience_level: ExperienceLevel::Junior,
            complexity: Complexity::Standard,
            duration_hours: 5.0,
            final_price: 1000.0,
        }];
        LearnedModel {
            format_version: MODEL_FORMAT_VERSION,
            trained_at: Utc::now(),
            n_examples: examples.len(),
            encoders: FeatureEncoders::fit(&examples),
            regressor: Regressor::Linear(LinearModel { coefficients }),
        }
    }

    fn plumbing_job(hours: f64) -> JobFeatures {
        JobFeatures {
            industry: "plumbing".into(),
            location: "gauteng".into(),
            experience_level: ExperienceLevel::Junior,
            complexity: Complexity::Standard,
            duration_hours: hours,
        }
    }

    #[test]
    fn absent_model_is_a_typed_failure() {
        assert_eq!(
            estimate_with(None, &plumbing_job(5.0)),
            Err(EstimateError::ModelAbsent)
        );
    }

    #[test]
    fn estimate_runs_the_regressor_on_the_encoded_row() {
        let model = linear_model(vec![10.0, 0.0, 0.0, 0.0, 0.0, 200.0]);
        assert_eq!(model.estimate(&plumbing_job(5.0)), Ok(1010.0));
    }

    #[test]
    fn non_finite_output_is_rejected() {
        let model = linear_model(vec![f64::NAN, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            model.estimate(&plumbing_job(5.0)),
            Err(EstimateError::NonFinite(_))
        ));
    }

    #[test]
    fn unseen_industry_fails_before_the_regressor_runs() {
        let model = linear_model(vec![0.0; 6]);
        let mut job = plumbing_job(5.0);
        job.industry = "electrical".into();
        assert!(matches!(
            model.estimate(&job),
            Err(EstimateError::UnseenCategory { .. })
        ));
    }
}
