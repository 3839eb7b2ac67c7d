//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed in from a request layer as JSON
//! - persisted as training data / model artifacts
//! - printed or exported by the CLI

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Seniority of the freelancer quoting the job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [Self::Junior, Self::Mid, Self::Senior];

    /// Wire name (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Difficulty tier of the job.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Standard,
    Complex,
    Expert,
}

impl Complexity {
    pub const ALL: [Complexity; 4] = [Self::Simple, Self::Standard, Self::Complex, Self::Expert];

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Standard => "standard",
            Complexity::Complex => "complex",
            Complexity::Expert => "expert",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Feature record for a single prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFeatures {
    pub industry: String,
    /// Free-form location key; matched case-insensitively.
    pub location: String,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub complexity: Complexity,
    pub duration_hours: f64,
}

impl Default for JobFeatures {
    fn default() -> Self {
        Self {
            industry: "graphic_design".to_string(),
            location: "gauteng".to_string(),
            experience_level: ExperienceLevel::Mid,
            complexity: Complexity::Standard,
            duration_hours: 8.0,
        }
    }
}

/// A historical job with its accepted final price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub industry: String,
    pub location: String,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub complexity: Complexity,
    pub duration_hours: f64,
    pub final_price: f64,
}

impl TrainingExample {
    /// Realized price per hour, or `None` when the duration cannot carry a rate.
    pub fn hourly_rate(&self) -> Option<f64> {
        if self.duration_hours > 0.0 && self.final_price.is_finite() {
            Some(self.final_price / self.duration_hours)
        } else {
            None
        }
    }

    /// The feature half of the example (drops the label).
    pub fn features(&self) -> JobFeatures {
        JobFeatures {
            industry: self.industry.clone(),
            location: self.location.clone(),
            experience_level: self.experience_level,
            complexity: self.complexity,
            duration_hours: self.duration_hours,
        }
    }
}

/// A `[min, max]` price interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Symmetric fractional spread around a center value: `center × (1 ∓ spread)`.
    pub fn spread_around(center: f64, spread: f64) -> Self {
        Self {
            min: center * (1.0 - spread),
            max: center * (1.0 + spread),
        }
    }

    /// Band around a learned point estimate, clamped so prices never go negative.
    pub fn band_around(point: f64, band: f64) -> Self {
        let range = Self::spread_around(point, band);
        Self {
            min: range.min.max(0.0),
            max: range.max.max(0.0),
        }
    }
}

/// Which estimation path produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// Rule table only; no learned model has been trained.
    Rules,
    /// Learned model produced the point estimate.
    Learned,
    /// A learned model exists but could not serve this call.
    RulesFallback,
}

impl PredictionSource {
    pub fn display_name(self) -> &'static str {
        match self {
            PredictionSource::Rules => "rule table",
            PredictionSource::Learned => "learned model",
            PredictionSource::RulesFallback => "rule table (learned model fallback)",
        }
    }
}

/// Engine output for a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub min_price: f64,
    pub max_price: f64,
    pub confidence: f64,
    pub rationale: String,
    pub source: PredictionSource,
}

/// Which regressor backs the learned estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegressorKind {
    /// Bagged regression trees.
    Forest,
    /// Ordinary least squares over the encoded features.
    Linear,
}

impl RegressorKind {
    pub fn display_name(self) -> &'static str {
        match self {
            RegressorKind::Forest => "random forest",
            RegressorKind::Linear => "linear (OLS)",
        }
    }
}

/// Tuning for the bagged tree regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    /// Features considered per split; `None` means all of them.
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 12,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

/// Confidence constants for each estimation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceParams {
    /// Rule-path confidence with no training data.
    pub base: f64,
    /// Added per training example on the rule path.
    pub per_example: f64,
    /// Upper bound for the rule path.
    pub cap: f64,
    pub learned: f64,
    pub fallback: f64,
}

impl Default for ConfidenceParams {
    fn default() -> Self {
        Self {
            base: 0.7,
            per_example: 0.01,
            cap: 0.9,
            learned: 0.85,
            fallback: 0.7,
        }
    }
}

/// Engine configuration.
///
/// The numeric defaults are empirical and kept as-is; callers may override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base rate used when the table has no entry for an (industry, level) pair.
    pub default_base_rate: f64,
    /// Rule spread while the training set is empty.
    pub cold_spread: f64,
    /// Rule spread once any training data exists.
    pub warm_spread: f64,
    /// Fractional band around a learned point estimate.
    pub learned_band: f64,
    pub confidence: ConfidenceParams,
    /// Samples a bucket needs before its base rate is replaced.
    pub min_bucket_samples: usize,
    pub regressor: RegressorKind,
    pub forest: ForestParams,
    /// Refit the learned model after every non-empty `record`.
    pub auto_retrain: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_base_rate: 200.0,
            cold_spread: 0.3,
            warm_spread: 0.2,
            learned_band: 0.15,
            confidence: ConfidenceParams::default(),
            min_bucket_samples: 3,
            regressor: RegressorKind::Forest,
            forest: ForestParams::default(),
            auto_retrain: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_example_uses_snake_case_wire_names() {
        let json = r#"{
            "industry": "plumbing",
            "location": "gauteng",
            "experience_level": "junior",
            "duration_hours": 5.0,
            "final_price": 1000.0
        }"#;
        let example: TrainingExample = serde_json::from_str(json).unwrap();
        assert_eq!(example.experience_level, ExperienceLevel::Junior);
        assert_eq!(example.complexity, Complexity::Standard);
        assert_eq!(example.hourly_rate(), Some(200.0));
    }

    #[test]
    fn hourly_rate_requires_positive_duration() {
        let mut example = TrainingExample {
            industry: "plumbing".into(),
            location: "gauteng".into(),
            experience_level: ExperienceLevel::Junior,
            complexity: Complexity::Standard,
            duration_hours: 0.0,
            final_price: 1000.0,
        };
        assert_eq!(example.hourly_rate(), None);
        example.duration_hours = -2.0;
        assert_eq!(example.hourly_rate(), None);
    }

    #[test]
    fn learned_band_never_goes_negative() {
        let range = PriceRange::band_around(-100.0, 0.15);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 0.0);

        let range = PriceRange::band_around(1000.0, 0.15);
        assert!((range.min - 850.0).abs() < 1e-9);
        assert!((range.max - 1150.0).abs() < 1e-9);
    }
}
