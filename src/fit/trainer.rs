//! Fit a `LearnedModel` from the full training set.
//!
//! Encoders are rebuilt over every example (not just the newest batch), then
//! the configured regressor is fitted against `final_price`. The result is a
//! fresh artifact; nothing about the previous model is reused.

use chrono::Utc;
use tracing::debug;

use crate::domain::{EngineConfig, RegressorKind, TrainingExample};
use crate::error::TrainError;
use crate::fit::{FeatureEncoders, Forest, LinearModel};
use crate::models::{LearnedModel, MODEL_FORMAT_VERSION, Regressor};

/// Encoded feature matrix and targets.
#[derive(Debug, Clone)]
pub struct Design {
    pub rows: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl Design {
    pub fn build(examples: &[TrainingExample], encoders: &FeatureEncoders) -> Self {
        let mut rows = Vec::with_capacity(examples.len());
        let mut targets = Vec::with_capacity(examples.len());
        for example in examples {
            // Encoders were fitted over these same examples, so every lookup hits.
            if let Ok(row) = encoders.encode(&example.features()) {
                rows.push(row.to_vec());
                targets.push(example.final_price);
            }
        }
        Self { rows, targets }
    }
}

pub fn train_model(
    examples: &[TrainingExample],
    config: &EngineConfig,
) -> Result<LearnedModel, TrainError> {
    if examples.is_empty() {
        return Err(TrainError::NoExamples);
    }

    let encoders = FeatureEncoders::fit(examples);
    let design = Design::build(examples, &encoders);
    debug!(
        rows = design.rows.len(),
        industries = encoders.industry.len(),
        locations = encoders.location.len(),
        regressor = config.regressor.display_name(),
        "fitting learned model"
    );

    let regressor = match config.regressor {
        RegressorKind::Forest => Forest::fit(&design.rows, &design.targets, &config.forest)
            .map(Regressor::Forest)
            .ok_or(TrainError::Degenerate("forest"))?,
        RegressorKind::Linear => LinearModel::fit(&design.rows, &design.targets)
            .map(Regressor::Linear)
            .ok_or(TrainError::Degenerate("linear"))?,
    };

    Ok(LearnedModel {
        format_version: MODEL_FORMAT_VERSION,
        trained_at: Utc::now(),
        n_examples: examples.len(),
        encoders,
        regressor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Complexity, ExperienceLevel, ForestParams, JobFeatures};

    fn example(industry: &str, location: &str, hours: f64, price: f64) -> TrainingExample {
        TrainingExample {
            industry: industry.into(),
            location: location.into(),
            experience_level: ExperienceLevel::Mid,
            complexity: Complexity::Standard,
            duration_hours: hours,
            final_price: price,
        }
    }

    fn small_forest() -> EngineConfig {
        EngineConfig {
            forest: ForestParams {
                n_trees: 10,
                ..ForestParams::default()
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let err = train_model(&[], &EngineConfig::default()).unwrap_err();
        assert_eq!(err, TrainError::NoExamples);
    }

    #[test]
    fn encoders_cover_every_example() {
        let examples = vec![
            example("plumbing", "gauteng", 4.0, 800.0),
            example("consulting", "limpopo", 2.0, 1200.0),
            example("plumbing", "Western_Cape", 6.0, 1300.0),
        ];
        let model = train_model(&examples, &small_forest()).unwrap();
        assert_eq!(model.n_examples, 3);
        assert_eq!(model.encoders.industry.len(), 2);
        let locations: Vec<&str> = model.encoders.location.categories().collect();
        assert_eq!(locations, vec!["gauteng", "limpopo", "western_cape"]);
        for e in &examples {
            assert!(model.estimate(&e.features()).is_ok());
        }
    }

    #[test]
    fn identical_inputs_give_identical_models() {
        let examples: Vec<TrainingExample> = (0..12)
            .map(|i| {
                let industry = if i % 2 == 0 { "plumbing" } else { "marketing" };
                example(industry, "gauteng", 1.0 + i as f64, 150.0 * (1.0 + i as f64))
            })
            .collect();
        let a = train_model(&examples, &small_forest()).unwrap();
        let b = train_model(&examples, &small_forest()).unwrap();
        assert_eq!(a.regressor, b.regressor);
        assert_eq!(a.encoders, b.encoders);
    }

    #[test]
    fn linear_regressor_learns_an_hourly_rate() {
        let examples: Vec<TrainingExample> = [2.0, 4.0, 6.0, 8.0]
            .iter()
            .map(|&h| example("plumbing", "gauteng", h, 250.0 * h))
            .collect();
        let config = EngineConfig {
            regressor: RegressorKind::Linear,
            ..EngineConfig::default()
        };
        let model = train_model(&examples, &config).unwrap();
        assert_eq!(model.kind(), RegressorKind::Linear);

        let job = JobFeatures {
            industry: "plumbing".into(),
            location: "gauteng".into(),
            experience_level: ExperienceLevel::Mid,
            complexity: Complexity::Standard,
            duration_hours: 10.0,
        };
        let point = model.estimate(&job).unwrap();
        assert!((point - 2500.0).abs() < 1e-6, "got {point}");
    }
}
